mod inmemory;

pub use inmemory::InMemoryEventRepo;
use recur_scheduler_domain::{Event, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    async fn save(&self, e: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    /// Events having `parent_event_id` as parent, in insertion order
    async fn find_by_parent(&self, parent_event_id: &ID) -> anyhow::Result<Vec<Event>>;
    async fn delete(&self, event_id: &ID) -> Option<Event>;
}
