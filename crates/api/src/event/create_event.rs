use crate::calendar::ensure_calendar::{self, ensure_calendar};
use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use recur_scheduler_domain::{Event, ID};
use recur_scheduler_infra::SchedulerContext;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct CreateEventUseCase {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub rule_id: Option<ID>,
    pub end_recurring_period: Option<NaiveDateTime>,
    pub calendar_id: Option<ID>,
    pub parent_event_id: Option<ID>,
    pub place: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimespan,
    InvalidRule(String),
    NotFound(String, ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The provided start and end is invalid".into())
            }
            UseCaseError::InvalidRule(msg) => Self::BadClientData(msg),
            UseCaseError::NotFound(entity, id) => Self::NotFound(format!(
                "The {} with id: {}, was not found.",
                entity, id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<ensure_calendar::UseCaseError> for UseCaseError {
    fn from(e: ensure_calendar::UseCaseError) -> Self {
        match e {
            ensure_calendar::UseCaseError::NotFound(id) => Self::NotFound("Calendar".into(), id),
            ensure_calendar::UseCaseError::StorageError => Self::StorageError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        if self.end < self.start {
            return Err(UseCaseError::InvalidTimespan);
        }

        let mut e = Event::new(&self.title, self.start, self.end);
        e.description = self.description.clone();
        e.end_recurring_period = self.end_recurring_period;
        e.calendar_id = self.calendar_id.clone();
        e.place = self.place.clone();
        e.created = Some(ctx.sys.now());

        if let Some(rule_id) = &self.rule_id {
            let rule = match ctx.repos.rules.find(rule_id).await {
                Some(rule) => rule,
                None => return Err(UseCaseError::NotFound("Rule".into(), rule_id.clone())),
            };
            // Fail now rather than every time the occurrences are asked for
            rule.expander(self.start)
                .map_err(|e| UseCaseError::InvalidRule(e.to_string()))?;
            e.rule = Some(Arc::new(rule));
        }

        if let Some(parent_event_id) = &self.parent_event_id {
            if ctx.repos.events.find(parent_event_id).await.is_none() {
                return Err(UseCaseError::NotFound(
                    "Event".into(),
                    parent_event_id.clone(),
                ));
            }
            e.parent_event_id = Some(parent_event_id.clone());
        }

        ensure_calendar(&mut e, ctx).await?;

        ctx.repos
            .events
            .insert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(e)
    }
}
