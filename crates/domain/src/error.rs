use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The recurrence rule could not be turned into a valid expansion
    #[error("Invalid recurrence configuration: {0}")]
    Configuration(String),
    /// The engine was asked for something its own contract rules out
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}
