use crate::error::SchedulerError;
use recur_scheduler_domain::{Calendar, Event, ID};
use recur_scheduler_infra::SchedulerContext;
use tracing::info;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(calendar_id) => Self::NotFound(format!(
                "The calendar with id: {}, was not found.",
                calendar_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// The `Calendar` of `event`. Events without one are assigned the
/// calendar named after `Config::default_calendar_name`, which is created
/// the first time it is needed.
pub async fn ensure_calendar(
    event: &mut Event,
    ctx: &SchedulerContext,
) -> Result<Calendar, UseCaseError> {
    if let Some(calendar_id) = &event.calendar_id {
        return ctx
            .repos
            .calendars
            .find(calendar_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(calendar_id.clone()));
    }

    let name = &ctx.config.default_calendar_name;
    let calendar = match ctx.repos.calendars.find_by_name(name).await {
        Some(calendar) => calendar,
        None => {
            let calendar = Calendar::new(name);
            info!(calendar_id = %calendar.id, %name, "Creating default calendar");
            ctx.repos
                .calendars
                .insert(&calendar)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            calendar
        }
    };
    event.calendar_id = Some(calendar.id.clone());

    Ok(calendar)
}
