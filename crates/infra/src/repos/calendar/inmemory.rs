use super::ICalendarRepo;
use crate::repos::shared::inmemory_repo::*;
use recur_scheduler_domain::{Calendar, ID};

pub struct InMemoryCalendarRepo {
    calendars: std::sync::Mutex<Vec<Calendar>>,
}

impl InMemoryCalendarRepo {
    pub fn new() -> Self {
        Self {
            calendars: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarRepo for InMemoryCalendarRepo {
    async fn insert(&self, calendar: &Calendar) -> anyhow::Result<()> {
        insert(calendar, &self.calendars)
    }

    async fn find(&self, calendar_id: &ID) -> Option<Calendar> {
        find(calendar_id, &self.calendars)
    }

    async fn find_by_name(&self, name: &str) -> Option<Calendar> {
        find_by(&self.calendars, |calendar| calendar.name == name)
            .into_iter()
            .next()
    }
}
