use crate::{event::Event, occurrence::Occurrence, reconciler::OccurrenceReconciler, rule::RuleCursor};
use chrono::NaiveDateTime;
use std::mem;
use tracing::debug;

enum State {
    /// One time only event which has not been looked at yet
    Single,
    Recurring(RuleCursor),
    Done,
}

/// Lazy, single pass sequence of the occurrences of an `Event` which end
/// after a given instant. Created by `Event::occurrences_after`.
///
/// Every call to `next` advances the recurrence rule only as far as needed
/// to produce the next occurrence. The sequence ends once the rule is
/// exhausted or passes the end of the recurring period of the event, which
/// for an open ended rule might be never.
pub struct OccurrencesAfter {
    event: Event,
    after: NaiveDateTime,
    state: State,
    reconciler: OccurrenceReconciler,
}

impl OccurrencesAfter {
    pub(crate) fn new(
        event: Event,
        after: NaiveDateTime,
        cursor: Option<RuleCursor>,
        reconciler: OccurrenceReconciler,
    ) -> Self {
        let state = match cursor {
            Some(cursor) => State::Recurring(cursor),
            None => State::Single,
        };
        Self {
            event,
            after,
            state,
            reconciler,
        }
    }

    fn next_virtual(&mut self) -> Option<Occurrence> {
        match mem::replace(&mut self.state, State::Done) {
            State::Done => None,
            State::Single => {
                if self.event.end > self.after {
                    Some(self.event.create_occurrence(self.event.start))
                } else {
                    None
                }
            }
            State::Recurring(mut cursor) => {
                let duration = self.event.duration();
                while let Some(o_start) = cursor.next() {
                    if let Some(end_recurring_period) = self.event.end_recurring_period {
                        if o_start > end_recurring_period {
                            debug!(event_id = %self.event.id, "Reached end of recurring period");
                            return None;
                        }
                    }
                    if o_start + duration > self.after {
                        self.state = State::Recurring(cursor);
                        return Some(self.event.create_occurrence(o_start));
                    }
                }
                None
            }
        }
    }
}

impl Iterator for OccurrencesAfter {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let occurrence = self.next_virtual()?;
        Some(self.reconciler.resolve(occurrence))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        occurrence::Occurrence,
        rule::RecurrenceRule,
        shared::{entity::ID, recurrence::RRuleFrequency},
        Event,
    };
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn dt(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn weekly_event() -> Event {
        let mut event = Event::new("Weekly", dt(2021, 1, 4, 10), dt(2021, 1, 4, 11));
        event.rule = Some(Arc::new(RecurrenceRule::new(
            "Weekly",
            RRuleFrequency::Weekly,
            "",
        )));
        event
    }

    #[test]
    fn yields_single_occurrence_only_when_it_ends_after_cutoff() {
        let event = Event::new("Once", dt(2021, 1, 4, 10), dt(2021, 1, 4, 11));

        let mut occurrences = event.occurrences_after(dt(2021, 1, 4, 10), vec![]).unwrap();
        assert_eq!(occurrences.next().map(|o| o.start), Some(event.start));
        assert!(occurrences.next().is_none());
        assert!(occurrences.next().is_none());

        // Ending exactly at the cutoff is not after it
        let mut occurrences = event.occurrences_after(dt(2021, 1, 4, 11), vec![]).unwrap();
        assert!(occurrences.next().is_none());
    }

    #[test]
    fn open_ended_rule_is_consumed_incrementally() {
        let event = weekly_event();
        let occurrences = event
            .occurrences_after(dt(2021, 1, 4, 10), vec![])
            .unwrap()
            .take(500)
            .collect::<Vec<_>>();

        assert_eq!(occurrences.len(), 500);
        for (i, occurrence) in occurrences.iter().enumerate() {
            assert_eq!(
                occurrence.start,
                dt(2021, 1, 4, 10) + Duration::weeks(i as i64)
            );
            assert_eq!(occurrence.end - occurrence.start, Duration::hours(1));
        }
    }

    #[test]
    fn includes_occurrence_still_running_at_cutoff() {
        let event = weekly_event();
        let mut occurrences = event
            .occurrences_after(dt(2021, 1, 11, 10) + Duration::minutes(30), vec![])
            .unwrap();
        assert_eq!(occurrences.next().map(|o| o.start), Some(dt(2021, 1, 11, 10)));
        assert_eq!(occurrences.next().map(|o| o.start), Some(dt(2021, 1, 18, 10)));
    }

    #[test]
    fn stops_at_end_of_recurring_period() {
        let mut event = weekly_event();
        event.end_recurring_period = Some(dt(2021, 2, 1, 10));

        let starts = event
            .occurrences_after(dt(2021, 1, 1, 0), vec![])
            .unwrap()
            .map(|o| o.start)
            .collect::<Vec<_>>();
        assert_eq!(
            starts,
            vec![
                dt(2021, 1, 4, 10),
                dt(2021, 1, 11, 10),
                dt(2021, 1, 18, 10),
                dt(2021, 1, 25, 10),
                dt(2021, 2, 1, 10),
            ]
        );

        event.end_recurring_period = Some(dt(2021, 2, 1, 9));
        let occurrences = event.occurrences_after(dt(2021, 1, 1, 0), vec![]).unwrap();
        assert!(occurrences.into_iter().all(|o| o.start < dt(2021, 2, 1, 9)));
    }

    #[test]
    fn stops_when_rule_is_exhausted() {
        let mut event = weekly_event();
        event.rule = Some(Arc::new(RecurrenceRule::new(
            "Three times",
            RRuleFrequency::Weekly,
            "count:3",
        )));
        let occurrences = event.occurrences_after(dt(2021, 1, 1, 0), vec![]).unwrap();
        assert_eq!(occurrences.count(), 3);
    }

    #[test]
    fn replaces_with_persisted_occurrences() {
        let event = weekly_event();
        let mut persisted = event.create_occurrence(dt(2021, 1, 11, 10));
        persisted.id = Some(ID::new());
        persisted.cancel();

        let occurrences: Vec<Occurrence> = event
            .occurrences_after(dt(2021, 1, 1, 0), vec![persisted])
            .unwrap()
            .take(3)
            .collect();
        assert!(!occurrences[0].cancelled);
        assert!(occurrences[1].cancelled);
        assert!(occurrences[1].is_persisted());
        assert!(!occurrences[2].is_persisted());
    }
}
