use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use recur_scheduler_domain::{DomainError, Occurrence, ID};
use recur_scheduler_infra::SchedulerContext;

/// The next `limit` occurrences of an `Event` that end after `after`, or
/// after the current time when `after` is not given.
#[derive(Debug)]
pub struct GetUpcomingOccurrencesUseCase {
    pub event_id: ID,
    pub after: Option<NaiveDateTime>,
    pub limit: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Domain(DomainError),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::Domain(e) => Self::from_domain(e),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingOccurrencesUseCase {
    type Response = Vec<Occurrence>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingOccurrences";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        let persisted = ctx
            .repos
            .occurrences
            .find_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let after = self.after.unwrap_or_else(|| ctx.sys.now());
        let limit = self.limit.min(ctx.config.upcoming_occurrences_limit);

        let occurrences = event
            .occurrences_after(after, persisted)
            .map_err(UseCaseError::Domain)?
            .take(limit)
            .collect();

        Ok(occurrences)
    }
}
