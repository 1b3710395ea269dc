mod inmemory;

pub use inmemory::InMemoryCalendarRepo;
use recur_scheduler_domain::{Calendar, ID};

#[async_trait::async_trait]
pub trait ICalendarRepo: Send + Sync {
    async fn insert(&self, calendar: &Calendar) -> anyhow::Result<()>;
    async fn find(&self, calendar_id: &ID) -> Option<Calendar>;
    async fn find_by_name(&self, name: &str) -> Option<Calendar>;
}
