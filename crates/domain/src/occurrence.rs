use crate::shared::entity::ID;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Occurrence of an `Event`.
///
/// A virtual occurrence is produced by expanding the recurrence rule of its
/// event and has no `id`. Once it is edited or cancelled it is persisted
/// and from then on overrides the virtual occurrence with the same
/// `original_start` and `original_end`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: Option<ID>,
    pub event_id: ID,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub cancelled: bool,
}

impl Occurrence {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn moved(&self) -> bool {
        self.original_start != self.start || self.original_end != self.end
    }

    /// Key identifying the virtual occurrence this occurrence stems from
    pub fn original_key(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.original_start, self.original_end)
    }

    pub fn move_to(&mut self, new_start: NaiveDateTime, new_end: NaiveDateTime) {
        self.start = new_start;
        self.end = new_end;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn uncancel(&mut self) {
        self.cancelled = false;
    }

    /// Whether the current span of the occurrence should be part of
    /// a query for `[start, end)`. The end is compared inclusively.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end >= start
    }

    /// Orders by `start` and then by `end`
    pub fn cmp_by_time(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialEq for Occurrence {
    fn eq(&self, other: &Self) -> bool {
        self.event_id == other.event_id
            && self.original_start == other.original_start
            && self.original_end == other.original_end
    }
}

impl Eq for Occurrence {}
