use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::{Duration, NaiveDateTime};
use recur_scheduler_domain::{DomainError, Event, Occurrence, TimeSpan, ID};
use recur_scheduler_infra::SchedulerContext;

/// Occurrences of an `Event` in the window `[start, end)`, with the edited
/// and cancelled ones in place of their virtual counterparts.
#[derive(Debug)]
pub struct GetEventOccurrencesUseCase {
    pub event_id: ID,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTimespan,
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
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The provided start and end is invalid".into())
            }
            UseCaseError::Domain(e) => Self::from_domain(e),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: Event,
    pub occurrences: Vec<Occurrence>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventOccurrencesUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventOccurrences";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let timespan =
            TimeSpan::create(self.start, self.end).map_err(|_| UseCaseError::InvalidTimespan)?;
        if timespan.greater_than(Duration::days(
            ctx.config.occurrences_query_duration_limit_days,
        )) {
            return Err(UseCaseError::InvalidTimespan);
        }

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

        let occurrences = event
            .get_occurrences(&timespan, persisted)
            .map_err(UseCaseError::Domain)?;

        Ok(UseCaseResponse { event, occurrences })
    }
}
