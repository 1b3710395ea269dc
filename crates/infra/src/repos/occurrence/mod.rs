mod inmemory;

use chrono::NaiveDateTime;
pub use inmemory::InMemoryOccurrenceRepo;
use recur_scheduler_domain::{Occurrence, ID};

/// Storage of the edited or cancelled occurrences of events. Only
/// persisted occurrences, those with an `id`, are stored.
#[async_trait::async_trait]
pub trait IOccurrenceRepo: Send + Sync {
    async fn insert(&self, occurrence: &Occurrence) -> anyhow::Result<()>;
    async fn save(&self, occurrence: &Occurrence) -> anyhow::Result<()>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Occurrence>>;
    async fn find_by_original_start(
        &self,
        event_id: &ID,
        original_start: NaiveDateTime,
    ) -> Option<Occurrence>;
    async fn delete(&self, occurrence_id: &ID) -> Option<Occurrence>;
}
