use crate::{
    error::DomainError,
    occurrence::Occurrence,
    occurrences_after::OccurrencesAfter,
    reconciler::OccurrenceReconciler,
    rule::{RecurrenceRule, RuleExpander},
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
};
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    /// Expected to be later than `start`, but this is not enforced here
    pub end: NaiveDateTime,
    /// `None` for one time only events
    pub rule: Option<Arc<RecurrenceRule>>,
    /// Ignored for one time only events
    pub end_recurring_period: Option<NaiveDateTime>,
    pub calendar_id: Option<ID>,
    pub parent_event_id: Option<ID>,
    pub place: Option<String>,
    /// Set when the event is stored
    pub created: Option<NaiveDateTime>,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Event {
    pub fn new(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: Default::default(),
            title: title.into(),
            description: String::new(),
            start,
            end,
            rule: None,
            end_recurring_period: None,
            calendar_id: None,
            parent_event_id: None,
            place: None,
            created: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_recurring(&self) -> bool {
        self.rule.is_some()
    }

    /// The recurrence rule bound to the start of this event
    pub fn expander(&self) -> Result<Option<RuleExpander>, DomainError> {
        match &self.rule {
            Some(rule) => rule.expander(self.start).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn create_occurrence(&self, start: NaiveDateTime) -> Occurrence {
        let end = start + self.duration();
        Occurrence {
            id: None,
            event_id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            start,
            end,
            original_start: start,
            original_end: end,
            cancelled: false,
        }
    }

    fn reconciler(&self, persisted: impl IntoIterator<Item = Occurrence>) -> OccurrenceReconciler {
        OccurrenceReconciler::new(
            persisted
                .into_iter()
                .filter(|occurrence| occurrence.event_id == self.id),
        )
    }

    /// Virtual occurrences of this event in `timespan`, persisted
    /// occurrences are not taken into account.
    pub fn get_occurrence_list(&self, timespan: &TimeSpan) -> Result<Vec<Occurrence>, DomainError> {
        let expander = match self.expander()? {
            Some(expander) => expander,
            None => {
                // One time only event
                if self.start < timespan.end() && self.end >= timespan.start() {
                    return Ok(vec![self.create_occurrence(self.start)]);
                }
                return Ok(Vec::new());
            }
        };

        let mut end = timespan.end();
        if let Some(end_recurring_period) = self.end_recurring_period {
            if end_recurring_period < end {
                debug!(
                    event_id = %self.id,
                    %end_recurring_period,
                    "Clamping query end to end of recurring period"
                );
                end = end_recurring_period;
            }
        }

        // Widen the start by one duration so that occurrences starting before
        // the timespan but still running at its start are included.
        let start = timespan.start() - self.duration();

        Ok(expander
            .between(start, end)
            .into_iter()
            .map(|o_start| self.create_occurrence(o_start))
            .collect())
    }

    /// Occurrences of this event in `timespan` where the virtual occurrences
    /// are replaced by their `persisted` counterparts.
    ///
    /// Persisted occurrences which have been moved out of `timespan` are left
    /// out, and persisted occurrences which originate outside of `timespan`
    /// but have been moved into it are appended at the end.
    pub fn get_occurrences(
        &self,
        timespan: &TimeSpan,
        persisted: impl IntoIterator<Item = Occurrence>,
    ) -> Result<Vec<Occurrence>, DomainError> {
        let mut reconciler = self.reconciler(persisted);
        let occurrences = self.get_occurrence_list(timespan)?;

        let mut final_occurrences = Vec::with_capacity(occurrences.len());
        for occurrence in occurrences {
            if reconciler.has_override(occurrence.original_start, occurrence.original_end) {
                let persisted =
                    reconciler.get_override(occurrence.original_start, occurrence.original_end)?;
                if persisted.intersects(timespan.start(), timespan.end()) {
                    final_occurrences.push(persisted);
                } else {
                    debug!(
                        event_id = %self.id,
                        original_start = %persisted.original_start,
                        start = %persisted.start,
                        "Persisted occurrence was moved out of the timespan"
                    );
                }
            } else {
                final_occurrences.push(occurrence);
            }
        }

        final_occurrences.extend(reconciler.unconsulted_overrides(timespan));
        Ok(final_occurrences)
    }

    /// Lazy sequence of the occurrences ending after `after`, with persisted
    /// occurrences taking the place of their virtual counterparts.
    pub fn occurrences_after(
        &self,
        after: NaiveDateTime,
        persisted: impl IntoIterator<Item = Occurrence>,
    ) -> Result<OccurrencesAfter, DomainError> {
        let reconciler = self.reconciler(persisted);
        let cursor = self
            .expander()?
            // Any occurrence ending after `after` starts after `after - duration`
            .map(|expander| expander.iter_from(Some(after - self.duration())));

        Ok(OccurrencesAfter::new(self.clone(), after, cursor, reconciler))
    }

    /// The occurrence starting exactly at `date`, if the event has one
    pub fn get_occurrence(
        &self,
        date: NaiveDateTime,
        persisted: impl IntoIterator<Item = Occurrence>,
    ) -> Result<Option<Occurrence>, DomainError> {
        let next_occurrence = match self.expander()? {
            Some(expander) => expander
                .after(date, true)
                .filter(|next| match self.end_recurring_period {
                    Some(end_recurring_period) => *next <= end_recurring_period,
                    None => true,
                }),
            None => Some(self.start),
        };
        if next_occurrence != Some(date) {
            return Ok(None);
        }

        let occurrence = persisted
            .into_iter()
            .find(|occurrence| occurrence.event_id == self.id && occurrence.original_start == date)
            .unwrap_or_else(|| self.create_occurrence(date));
        Ok(Some(occurrence))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::recurrence::RRuleFrequency;
    use chrono::NaiveDate;

    fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn rule(frequency: RRuleFrequency, params: &str) -> Option<Arc<RecurrenceRule>> {
        Some(Arc::new(RecurrenceRule::new("rule", frequency, params)))
    }

    fn monthly_event() -> Event {
        let mut event = Event::new("Monthly", dt(2008, 1, 1, 0, 0), dt(2008, 1, 2, 0, 0));
        event.rule = rule(RRuleFrequency::Monthly, "");
        event
    }

    fn spans(occurrences: &[Occurrence]) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        occurrences.iter().map(|o| (o.start, o.end)).collect()
    }

    fn persist(mut occurrence: Occurrence) -> Occurrence {
        occurrence.id = Some(ID::new());
        occurrence
    }

    #[test]
    fn monthly_event_occurrences() {
        let event = monthly_event();
        let timespan = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 2, 0, 0));

        let occurrences = event.get_occurrences(&timespan, vec![]).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![
                (dt(2008, 2, 1, 0, 0), dt(2008, 2, 2, 0, 0)),
                (dt(2008, 3, 1, 0, 0), dt(2008, 3, 2, 0, 0)),
            ]
        );
        assert!(occurrences.iter().all(|o| !o.is_persisted() && !o.moved()));
    }

    #[test]
    fn event_without_rule_outside_timespan() {
        let event = Event::new("Once", dt(2008, 1, 1, 8, 0), dt(2008, 1, 1, 9, 0));
        let timespan = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 2, 0, 0));
        assert!(event.get_occurrences(&timespan, vec![]).unwrap().is_empty());
    }

    #[test]
    fn event_without_rule_boundaries() {
        let event = Event::new("Once", dt(2008, 1, 1, 8, 0), dt(2008, 1, 1, 9, 0));

        // Window ending exactly at the start excludes the event
        let ts = TimeSpan::new(dt(2008, 1, 1, 0, 0), dt(2008, 1, 1, 8, 0));
        assert!(event.get_occurrence_list(&ts).unwrap().is_empty());

        // Window starting exactly at the end includes the event
        let ts = TimeSpan::new(dt(2008, 1, 1, 9, 0), dt(2008, 1, 2, 0, 0));
        let occurrences = event.get_occurrence_list(&ts).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![(dt(2008, 1, 1, 8, 0), dt(2008, 1, 1, 9, 0))]
        );
        assert_eq!(occurrences[0].original_start, event.start);
        assert_eq!(occurrences[0].original_end, event.end);
    }

    #[test]
    fn includes_occurrence_running_at_timespan_start() {
        let event = monthly_event();
        let ts = TimeSpan::new(dt(2008, 2, 1, 12, 0), dt(2008, 2, 10, 0, 0));
        let occurrences = event.get_occurrence_list(&ts).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![(dt(2008, 2, 1, 0, 0), dt(2008, 2, 2, 0, 0))]
        );
    }

    #[test]
    fn preserves_duration() {
        let mut event = Event::new("Daily", dt(2020, 1, 1, 9, 0), dt(2020, 1, 1, 10, 30));
        event.rule = rule(RRuleFrequency::Daily, "interval:3");
        let ts = TimeSpan::new(dt(2020, 1, 1, 0, 0), dt(2020, 3, 1, 0, 0));
        let occurrences = event.get_occurrence_list(&ts).unwrap();
        assert_eq!(occurrences.len(), 20);
        for occurrence in &occurrences {
            assert_eq!(occurrence.end - occurrence.start, event.duration());
        }
    }

    #[test]
    fn end_recurring_period_clamps_expansion() {
        let mut event = monthly_event();
        event.end_recurring_period = Some(dt(2008, 3, 1, 0, 0));
        let ts = TimeSpan::new(dt(2008, 1, 1, 0, 0), dt(2008, 12, 31, 0, 0));
        let occurrences = event.get_occurrence_list(&ts).unwrap();
        assert_eq!(occurrences.len(), 3);
        assert_eq!(occurrences[2].start, dt(2008, 3, 1, 0, 0));
    }

    #[test]
    fn end_recurring_period_before_start_yields_nothing() {
        let mut event = monthly_event();
        event.end_recurring_period = Some(dt(2007, 6, 1, 0, 0));
        let ts = TimeSpan::new(dt(2007, 1, 1, 0, 0), dt(2009, 1, 1, 0, 0));
        assert!(event.get_occurrence_list(&ts).unwrap().is_empty());
        assert_eq!(
            event
                .occurrences_after(dt(2000, 1, 1, 0, 0), vec![])
                .unwrap()
                .count(),
            0
        );
    }

    #[test]
    fn rule_ending_before_start_yields_nothing() {
        let mut event = Event::new("Monthly", dt(2011, 1, 1, 0, 0), dt(2011, 1, 2, 0, 0));
        event.rule = rule(RRuleFrequency::Monthly, "until:2010-01-01");
        let ts = TimeSpan::new(dt(2011, 1, 1, 0, 0), dt(2011, 6, 1, 0, 0));

        assert!(event.get_occurrences(&ts, vec![]).unwrap().is_empty());
        assert_eq!(
            event
                .occurrences_after(dt(2011, 1, 1, 0, 0), vec![])
                .unwrap()
                .count(),
            0
        );
        assert!(event
            .get_occurrence(dt(2011, 1, 1, 0, 0), vec![])
            .unwrap()
            .is_none());
    }

    #[test]
    fn substitutes_persisted_occurrence() {
        let event = monthly_event();
        let ts = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 2, 0, 0));

        let mut edited = persist(event.create_occurrence(dt(2008, 2, 1, 0, 0)));
        edited.move_to(dt(2008, 2, 3, 0, 0), dt(2008, 2, 4, 0, 0));
        edited.cancel();

        let occurrences = event.get_occurrences(&ts, vec![edited.clone()]).unwrap();
        assert_eq!(occurrences.len(), 2);
        assert!(occurrences[0].is_persisted());
        assert!(occurrences[0].cancelled);
        assert_eq!(occurrences[0].start, dt(2008, 2, 3, 0, 0));
        assert!(!occurrences[1].is_persisted());
    }

    #[test]
    fn drops_override_moved_out_of_timespan() {
        let event = monthly_event();
        let ts = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 2, 0, 0));

        let mut edited = persist(event.create_occurrence(dt(2008, 2, 1, 0, 0)));
        edited.move_to(dt(2008, 4, 10, 0, 0), dt(2008, 4, 11, 0, 0));

        let occurrences = event.get_occurrences(&ts, vec![edited]).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![(dt(2008, 3, 1, 0, 0), dt(2008, 3, 2, 0, 0))]
        );
    }

    #[test]
    fn includes_occurrence_moved_into_timespan_once() {
        let event = monthly_event();
        let mut edited = persist(event.create_occurrence(dt(2008, 3, 1, 0, 0)));
        edited.move_to(dt(2008, 3, 11, 0, 0), dt(2008, 3, 12, 0, 0));

        // Moved out of the original window
        let ts = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 2, 0, 0));
        let occurrences = event.get_occurrences(&ts, vec![edited.clone()]).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![(dt(2008, 2, 1, 0, 0), dt(2008, 2, 2, 0, 0))]
        );

        // Both the original slot and the new time are inside this one
        let ts = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 20, 0, 0));
        let occurrences = event.get_occurrences(&ts, vec![edited.clone()]).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![
                (dt(2008, 2, 1, 0, 0), dt(2008, 2, 2, 0, 0)),
                (dt(2008, 3, 11, 0, 0), dt(2008, 3, 12, 0, 0)),
            ]
        );

        // Only the new time is inside this one
        let ts = TimeSpan::new(dt(2008, 3, 10, 0, 0), dt(2008, 3, 20, 0, 0));
        let occurrences = event.get_occurrences(&ts, vec![edited]).unwrap();
        assert_eq!(
            spans(&occurrences),
            vec![(dt(2008, 3, 11, 0, 0), dt(2008, 3, 12, 0, 0))]
        );
        assert!(occurrences[0].is_persisted());
    }

    #[test]
    fn ignores_occurrences_of_other_events() {
        let event = monthly_event();
        let other = monthly_event();
        let mut foreign = persist(other.create_occurrence(dt(2008, 2, 1, 0, 0)));
        foreign.move_to(dt(2008, 2, 5, 0, 0), dt(2008, 2, 6, 0, 0));

        let ts = TimeSpan::new(dt(2008, 1, 24, 0, 0), dt(2008, 3, 2, 0, 0));
        let occurrences = event.get_occurrences(&ts, vec![foreign]).unwrap();
        assert!(occurrences.iter().all(|o| !o.is_persisted()));
        assert_eq!(occurrences.len(), 2);
    }

    #[test]
    fn propagates_configuration_errors() {
        let mut event = monthly_event();
        event.rule = rule(RRuleFrequency::Monthly, "bymonth:13");
        let ts = TimeSpan::new(dt(2008, 1, 1, 0, 0), dt(2008, 3, 1, 0, 0));
        assert!(matches!(
            event.get_occurrences(&ts, vec![]),
            Err(DomainError::Configuration(_))
        ));
        assert!(event.occurrences_after(dt(2008, 1, 1, 0, 0), vec![]).is_err());
    }

    #[test]
    fn gets_single_occurrence_by_date() {
        let event = monthly_event();

        let occ = event
            .get_occurrence(dt(2008, 5, 1, 0, 0), vec![])
            .unwrap()
            .expect("To be an occurrence");
        assert_eq!(occ.end, dt(2008, 5, 2, 0, 0));
        assert!(!occ.is_persisted());

        assert!(event
            .get_occurrence(dt(2008, 5, 2, 0, 0), vec![])
            .unwrap()
            .is_none());

        let mut edited = persist(event.create_occurrence(dt(2008, 6, 1, 0, 0)));
        edited.cancel();
        let occ = event
            .get_occurrence(dt(2008, 6, 1, 0, 0), vec![edited])
            .unwrap()
            .expect("To be an occurrence");
        assert!(occ.is_persisted());
        assert!(occ.cancelled);

        let once = Event::new("Once", dt(2008, 1, 1, 8, 0), dt(2008, 1, 1, 9, 0));
        assert!(once
            .get_occurrence(dt(2008, 1, 1, 8, 0), vec![])
            .unwrap()
            .is_some());
        assert!(once
            .get_occurrence(dt(2008, 1, 2, 8, 0), vec![])
            .unwrap()
            .is_none());
    }
}
