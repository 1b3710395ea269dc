mod config;
mod repos;
mod system;
pub mod telemetry;

pub use config::Config;
pub use repos::{ICalendarRepo, IEventRepo, IOccurrenceRepo, IRuleRepo, Repos};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl SchedulerContext {
    /// Context backed by inmemory repositories and the real clock
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}
