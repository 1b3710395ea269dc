use crate::{error::DomainError, occurrence::Occurrence, timespan::TimeSpan};
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

type OccurrenceKey = (NaiveDateTime, NaiveDateTime);

/// Matches virtual occurrences against the persisted occurrences of an
/// `Event`.
///
/// Persisted occurrences are indexed by their `(original_start, original_end)`
/// and every key handed out through `get_override` or `resolve` is remembered,
/// so that the overrides which were never matched by a virtual occurrence can
/// be surfaced afterwards with `unconsulted_overrides`.
#[derive(Debug, Default)]
pub struct OccurrenceReconciler {
    overrides: HashMap<OccurrenceKey, Occurrence>,
    consulted: HashSet<OccurrenceKey>,
}

impl OccurrenceReconciler {
    pub fn new(persisted: impl IntoIterator<Item = Occurrence>) -> Self {
        let overrides = persisted
            .into_iter()
            .map(|occurrence| (occurrence.original_key(), occurrence))
            .collect();
        Self {
            overrides,
            consulted: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn has_override(&self, original_start: NaiveDateTime, original_end: NaiveDateTime) -> bool {
        self.overrides
            .contains_key(&(original_start, original_end))
    }

    /// Callers are expected to check `has_override` first, asking for a
    /// missing key is a bug in the caller.
    pub fn get_override(
        &mut self,
        original_start: NaiveDateTime,
        original_end: NaiveDateTime,
    ) -> Result<Occurrence, DomainError> {
        let key = (original_start, original_end);
        match self.overrides.get(&key) {
            Some(occurrence) => {
                self.consulted.insert(key);
                Ok(occurrence.clone())
            }
            None => Err(DomainError::InvariantViolation(format!(
                "No persisted occurrence for original start: {} and original end: {}",
                original_start, original_end
            ))),
        }
    }

    /// The persisted version of `occurrence` if there is one, otherwise
    /// `occurrence` itself.
    pub fn resolve(&mut self, occurrence: Occurrence) -> Occurrence {
        let key = occurrence.original_key();
        match self.overrides.get(&key) {
            Some(persisted) => {
                self.consulted.insert(key);
                persisted.clone()
            }
            None => occurrence,
        }
    }

    /// Persisted occurrences that were never looked up, but whose current
    /// span falls inside `timespan`.
    pub fn unconsulted_overrides(&self, timespan: &TimeSpan) -> Vec<Occurrence> {
        let mut occurrences = self
            .overrides
            .iter()
            .filter(|(key, _)| !self.consulted.contains(*key))
            .map(|(_, occurrence)| occurrence)
            .filter(|occurrence| occurrence.intersects(timespan.start(), timespan.end()))
            .cloned()
            .collect::<Vec<_>>();
        occurrences.sort_by(Occurrence::cmp_by_time);
        occurrences
    }
}
