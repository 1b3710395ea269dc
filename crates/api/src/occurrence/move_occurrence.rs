use super::persist_occurrence;
use crate::error::SchedulerError;
use crate::event::get_occurrence::{self, find_occurrence};
use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use recur_scheduler_domain::{Occurrence, ID};
use recur_scheduler_infra::SchedulerContext;

/// Moves the occurrence of `event_id` originally starting at
/// `original_start` to `[start, end]`.
#[derive(Debug)]
pub struct MoveOccurrenceUseCase {
    pub event_id: ID,
    pub original_start: NaiveDateTime,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimespan,
    Lookup(get_occurrence::UseCaseError),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The provided start and end is invalid".into())
            }
            UseCaseError::Lookup(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MoveOccurrenceUseCase {
    type Response = Occurrence;

    type Error = UseCaseError;

    const NAME: &'static str = "MoveOccurrence";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        if self.end < self.start {
            return Err(UseCaseError::InvalidTimespan);
        }

        let mut occurrence = find_occurrence(&self.event_id, self.original_start, ctx)
            .await
            .map_err(UseCaseError::Lookup)?;
        occurrence.move_to(self.start, self.end);

        persist_occurrence(&mut occurrence, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(occurrence)
    }
}
