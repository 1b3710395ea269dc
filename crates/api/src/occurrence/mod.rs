pub mod cancel_occurrence;
pub mod move_occurrence;

pub use cancel_occurrence::CancelOccurrenceUseCase;
pub use move_occurrence::MoveOccurrenceUseCase;

use recur_scheduler_domain::{Occurrence, ID};
use recur_scheduler_infra::SchedulerContext;
use tracing::debug;

/// Stores an edited occurrence. A virtual occurrence is given an id and
/// inserted, an already persisted one is saved.
pub(crate) async fn persist_occurrence(
    occurrence: &mut Occurrence,
    ctx: &SchedulerContext,
) -> anyhow::Result<()> {
    if occurrence.is_persisted() {
        return ctx.repos.occurrences.save(occurrence).await;
    }

    let occurrence_id = ID::new();
    debug!(
        %occurrence_id,
        event_id = %occurrence.event_id,
        original_start = %occurrence.original_start,
        "Persisting virtual occurrence"
    );
    occurrence.id = Some(occurrence_id);
    ctx.repos.occurrences.insert(occurrence).await
}
