use crate::{event::Event, shared::entity::ID};
use chrono::{NaiveDate, NaiveTime};
use itertools::Itertools;
use std::collections::HashMap;

/// Index of the parent of every known `Event`.
///
/// Events refer to their parent by id only, so looking up the children of
/// an event is a scan of the index rather than a walk through the events.
#[derive(Debug, Default)]
pub struct EventHierarchy {
    entries: Vec<(ID, Option<ID>)>,
    positions: HashMap<ID, usize>,
}

impl EventHierarchy {
    pub fn new<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut hierarchy = Self::default();
        for event in events {
            hierarchy.insert(event.id.clone(), event.parent_event_id.clone());
        }
        hierarchy
    }

    /// Adds or replaces the parent of `event_id`
    pub fn insert(&mut self, event_id: ID, parent_id: Option<ID>) {
        match self.positions.get(&event_id) {
            Some(pos) => self.entries[*pos].1 = parent_id,
            None => {
                self.positions.insert(event_id.clone(), self.entries.len());
                self.entries.push((event_id, parent_id));
            }
        }
    }

    pub fn parent_of(&self, event_id: &ID) -> Option<&ID> {
        self.positions
            .get(event_id)
            .and_then(|pos| self.entries[*pos].1.as_ref())
    }

    /// Ids of the events having `event_id` as parent, in insertion order
    pub fn children_of(&self, event_id: &ID) -> Vec<ID> {
        self.entries
            .iter()
            .filter(|(_, parent)| parent.as_ref() == Some(event_id))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// All the agenda entries starting at the same time of a day, with one
/// cell per place of that day.
#[derive(Debug, Clone)]
pub struct AgendaSlot {
    pub time: NaiveTime,
    pub events: Vec<Option<Event>>,
}

#[derive(Debug, Clone)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub places: Vec<Option<String>>,
    pub slots: Vec<AgendaSlot>,
}

/// Lays out the agenda `events` (usually the children of an event) as a
/// grid per day: start times as rows and places as columns. When several
/// events share the same day, time and place the last one is kept.
pub fn structured_agenda(events: &[Event]) -> Vec<AgendaDay> {
    events
        .iter()
        .map(|event| event.start.date())
        .sorted()
        .dedup()
        .map(|date| {
            let day_events = events
                .iter()
                .filter(|event| event.start.date() == date)
                .collect::<Vec<_>>();

            let places = day_events
                .iter()
                .map(|event| event.place.clone())
                .sorted()
                .dedup()
                .collect::<Vec<_>>();

            let slots = day_events
                .iter()
                .map(|event| event.start.time())
                .sorted()
                .dedup()
                .map(|time| AgendaSlot {
                    time,
                    events: places
                        .iter()
                        .map(|place| {
                            day_events
                                .iter()
                                .rev()
                                .find(|event| event.start.time() == time && event.place == *place)
                                .map(|event| (*event).clone())
                        })
                        .collect(),
                })
                .collect();

            AgendaDay {
                date,
                places,
                slots,
            }
        })
        .collect()
}
