use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use recur_scheduler_domain::{DomainError, Occurrence, ID};
use recur_scheduler_infra::SchedulerContext;

#[derive(Debug)]
pub struct GetOccurrenceUseCase {
    pub event_id: ID,
    /// Start of the occurrence as generated by the rule of the event
    pub original_start: NaiveDateTime,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EventNotFound(ID),
    OccurrenceNotFound(ID, NaiveDateTime),
    Domain(DomainError),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::OccurrenceNotFound(event_id, start) => Self::NotFound(format!(
                "The event with id: {}, has no occurrence starting at: {}.",
                event_id, start
            )),
            UseCaseError::Domain(e) => Self::from_domain(e),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Looks up the occurrence of `event_id` originally starting at
/// `original_start`, persisted or virtual.
pub(crate) async fn find_occurrence(
    event_id: &ID,
    original_start: NaiveDateTime,
    ctx: &SchedulerContext,
) -> Result<Occurrence, UseCaseError> {
    let event = match ctx.repos.events.find(event_id).await {
        Some(event) => event,
        None => return Err(UseCaseError::EventNotFound(event_id.clone())),
    };
    let persisted = ctx
        .repos
        .occurrences
        .find_by_event(&event.id)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    event
        .get_occurrence(original_start, persisted)
        .map_err(UseCaseError::Domain)?
        .ok_or_else(|| UseCaseError::OccurrenceNotFound(event_id.clone(), original_start))
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetOccurrenceUseCase {
    type Response = Occurrence;

    type Error = UseCaseError;

    const NAME: &'static str = "GetOccurrence";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        find_occurrence(&self.event_id, self.original_start, ctx).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{dt, insert_event, setup_context};
    use recur_scheduler_domain::RRuleFrequency;

    #[tokio::test]
    async fn gets_virtual_and_persisted_occurrences() {
        let ctx = setup_context(dt(2021, 1, 1, 0));
        let event = insert_event(
            &ctx,
            "Daily",
            dt(2021, 1, 1, 9),
            dt(2021, 1, 1, 10),
            Some((RRuleFrequency::Daily, "")),
        )
        .await;

        let mut usecase = GetOccurrenceUseCase {
            event_id: event.id.clone(),
            original_start: dt(2021, 1, 3, 9),
        };
        let occurrence = usecase.execute(&ctx).await.unwrap();
        assert!(!occurrence.is_persisted());
        assert_eq!(occurrence.end, dt(2021, 1, 3, 10));

        let mut persisted = occurrence.clone();
        persisted.id = Some(ID::new());
        persisted.move_to(dt(2021, 1, 3, 15), dt(2021, 1, 3, 16));
        ctx.repos.occurrences.insert(&persisted).await.unwrap();

        let occurrence = usecase.execute(&ctx).await.unwrap();
        assert_eq!(occurrence.id, persisted.id);
        assert_eq!(occurrence.start, dt(2021, 1, 3, 15));
    }

    #[tokio::test]
    async fn rejects_date_not_on_rule() {
        let ctx = setup_context(dt(2021, 1, 1, 0));
        let event = insert_event(
            &ctx,
            "Daily",
            dt(2021, 1, 1, 9),
            dt(2021, 1, 1, 10),
            Some((RRuleFrequency::Daily, "")),
        )
        .await;

        let mut usecase = GetOccurrenceUseCase {
            event_id: event.id.clone(),
            original_start: dt(2021, 1, 3, 10),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::OccurrenceNotFound(event.id.clone(), dt(2021, 1, 3, 10))
        );
    }
}
