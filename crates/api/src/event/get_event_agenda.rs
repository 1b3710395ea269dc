use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use recur_scheduler_domain::{structured_agenda, AgendaDay, Event, ID};
use recur_scheduler_infra::SchedulerContext;

/// Agenda of the child events of an `Event`, laid out per day
#[derive(Debug)]
pub struct GetEventAgendaUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: Event,
    pub agenda: Vec<AgendaDay>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventAgendaUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventAgenda";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        let children = ctx
            .repos
            .events
            .find_by_parent(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let agenda = structured_agenda(&children);

        Ok(UseCaseResponse { event, agenda })
    }
}
