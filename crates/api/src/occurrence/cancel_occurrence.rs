use super::persist_occurrence;
use crate::error::SchedulerError;
use crate::event::get_occurrence::{self, find_occurrence};
use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use recur_scheduler_domain::{Occurrence, ID};
use recur_scheduler_infra::SchedulerContext;

/// Cancels, or with `cancel` set to false restores, the occurrence of
/// `event_id` originally starting at `original_start`.
#[derive(Debug)]
pub struct CancelOccurrenceUseCase {
    pub event_id: ID,
    pub original_start: NaiveDateTime,
    pub cancel: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Lookup(get_occurrence::UseCaseError),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Lookup(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelOccurrenceUseCase {
    type Response = Occurrence;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelOccurrence";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let mut occurrence = find_occurrence(&self.event_id, self.original_start, ctx)
            .await
            .map_err(UseCaseError::Lookup)?;
        if self.cancel {
            occurrence.cancel();
        } else {
            occurrence.uncancel();
        }

        persist_occurrence(&mut occurrence, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(occurrence)
    }
}
