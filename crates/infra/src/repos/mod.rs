mod calendar;
mod event;
mod occurrence;
mod rule;
mod shared;

pub use calendar::{ICalendarRepo, InMemoryCalendarRepo};
pub use event::{IEventRepo, InMemoryEventRepo};
pub use occurrence::{IOccurrenceRepo, InMemoryOccurrenceRepo};
pub use rule::{IRuleRepo, InMemoryRuleRepo};
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub occurrences: Arc<dyn IOccurrenceRepo>,
    pub calendars: Arc<dyn ICalendarRepo>,
    pub rules: Arc<dyn IRuleRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            occurrences: Arc::new(InMemoryOccurrenceRepo::new()),
            calendars: Arc::new(InMemoryCalendarRepo::new()),
            rules: Arc::new(InMemoryRuleRepo::new()),
        }
    }
}
