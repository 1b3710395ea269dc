use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use recur_scheduler_domain::{Event, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        insert(e, &self.events)
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        save(e, &self.events)
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        find(event_id, &self.events)
    }

    async fn find_by_parent(&self, parent_event_id: &ID) -> anyhow::Result<Vec<Event>> {
        let res = find_by(&self.events, |event| {
            event.parent_event_id.as_ref() == Some(parent_event_id)
        });
        Ok(res)
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        delete(event_id, &self.events)
    }
}
