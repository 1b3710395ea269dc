pub mod calendar;
mod error;
pub mod event;
pub mod occurrence;
pub mod rule;
mod shared;

pub use error::SchedulerError;
pub use shared::usecase::{execute, UseCase};
