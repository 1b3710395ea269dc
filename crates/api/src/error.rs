use recur_scheduler_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SchedulerError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl SchedulerError {
    /// Rule configuration problems are caused by the data the client gave
    /// us, anything else the engine reports is on us.
    pub(crate) fn from_domain(e: DomainError) -> Self {
        match e {
            DomainError::Configuration(msg) => Self::BadClientData(msg),
            DomainError::InvariantViolation(_) => Self::InternalError,
        }
    }
}
