use super::IOccurrenceRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDateTime;
use recur_scheduler_domain::{Occurrence, ID};

pub struct InMemoryOccurrenceRepo {
    occurrences: std::sync::Mutex<Vec<Occurrence>>,
}

impl InMemoryOccurrenceRepo {
    pub fn new() -> Self {
        Self {
            occurrences: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn persisted_id(occurrence: &Occurrence) -> anyhow::Result<&ID> {
    occurrence
        .id
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Only persisted occurrences can be stored"))
}

#[async_trait::async_trait]
impl IOccurrenceRepo for InMemoryOccurrenceRepo {
    async fn insert(&self, occurrence: &Occurrence) -> anyhow::Result<()> {
        persisted_id(occurrence)?;
        insert(occurrence, &self.occurrences)
    }

    async fn save(&self, occurrence: &Occurrence) -> anyhow::Result<()> {
        let occurrence_id = persisted_id(occurrence)?;
        save_by(occurrence, &self.occurrences, |o| {
            o.id.as_ref() == Some(occurrence_id)
        })
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Occurrence>> {
        let res = find_by(&self.occurrences, |o| o.event_id == *event_id);
        Ok(res)
    }

    async fn find_by_original_start(
        &self,
        event_id: &ID,
        original_start: NaiveDateTime,
    ) -> Option<Occurrence> {
        find_by(&self.occurrences, |o| {
            o.event_id == *event_id && o.original_start == original_start
        })
        .into_iter()
        .next()
    }

    async fn delete(&self, occurrence_id: &ID) -> Option<Occurrence> {
        delete_by(&self.occurrences, |o| o.id.as_ref() == Some(occurrence_id))
    }
}
