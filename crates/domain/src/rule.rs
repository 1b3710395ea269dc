use crate::{
    error::DomainError,
    shared::{
        entity::{Entity, ID},
        recurrence::{RRuleFrequency, RRuleOptions},
    },
};
use chrono::{NaiveDateTime, TimeZone};
use rrule::{RRule, RRuleSet, RRuleSetIter, Tz, Unvalidated};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named repetition pattern which any number of `Event`s can refer to.
///
/// `params` uses the `key:value[,value];key:value` form, e.g.
/// `interval:2;byweekday:0,4;count:10`, and is only interpreted when the
/// rule is expanded.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub id: ID,
    pub name: String,
    pub description: String,
    pub frequency: RRuleFrequency,
    pub params: String,
}

impl Entity for RecurrenceRule {
    fn id(&self) -> &ID {
        &self.id
    }
}

fn to_rrule_datetime(dt: NaiveDateTime) -> chrono::DateTime<Tz> {
    Tz::UTC.from_utc_datetime(&dt)
}

impl RecurrenceRule {
    pub fn new(name: &str, frequency: RRuleFrequency, params: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            description: String::new(),
            frequency,
            params: params.into(),
        }
    }

    pub fn get_params(&self) -> Result<RRuleOptions, DomainError> {
        RRuleOptions::parse(&self.params)
    }

    /// The RRULE property value this rule expands to
    pub fn to_rrule_string(&self) -> Result<String, DomainError> {
        Ok(self.get_params()?.to_rrule_string(self.frequency))
    }

    /// Binds the rule to a start instant, validating the parameters.
    ///
    /// A rule whose `until` lies before `dtstart` is valid for the rule
    /// but yields no instants for this start.
    pub fn expander(&self, dtstart: NaiveDateTime) -> Result<RuleExpander, DomainError> {
        let options = self.get_params()?;
        if options.until.map_or(false, |until| until < dtstart) {
            debug!(rule = %self.name, dtstart = %dtstart, "Rule ends before its start, nothing to expand");
            return Ok(RuleExpander { set: None });
        }

        let rrule_str = options.to_rrule_string(self.frequency);
        let rrule = rrule_str
            .parse::<RRule<Unvalidated>>()
            .map_err(|e| DomainError::Configuration(format!("{}: {}", rrule_str, e)))?;
        let set = rrule
            .build(to_rrule_datetime(dtstart))
            .map_err(|e| DomainError::Configuration(format!("{}: {}", rrule_str, e)))?
            .limit();

        debug!(rule = %self.name, rrule = %rrule_str, "Built rule expander");
        Ok(RuleExpander { set: Some(set) })
    }
}

/// A `RecurrenceRule` bound to a concrete start instant
#[derive(Clone, Debug)]
pub struct RuleExpander {
    /// `None` when the rule cannot produce any instant from its start
    set: Option<RRuleSet>,
}

impl RuleExpander {
    /// All instants within `[start, end]`, both bounds inclusive
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
        if end < start {
            return Vec::new();
        }
        self.iter_from(Some(start))
            .take_while(|instant| *instant <= end)
            .collect()
    }

    /// First instant after `instant`, or at it when `inclusive`
    pub fn after(&self, instant: NaiveDateTime, inclusive: bool) -> Option<NaiveDateTime> {
        self.iter_from(Some(instant))
            .find(|candidate| inclusive || *candidate > instant)
    }

    /// Lazy sequence of instants starting at the first one at or after
    /// `floor`, or at the rule start when there is no floor.
    pub fn iter_from(&self, floor: Option<NaiveDateTime>) -> RuleCursor {
        RuleCursor {
            instants: self.set.as_ref().map(|set| set.into_iter()),
            floor,
        }
    }
}

/// Ordered, resumable walk over the instants of a rule.
///
/// Every call to `next` advances the underlying rule by one instant.
/// Instants before the floor are skipped once, on the first call.
#[derive(Clone, Debug)]
pub struct RuleCursor {
    instants: Option<RRuleSetIter>,
    /// Inclusive lower bound, cleared once reached
    floor: Option<NaiveDateTime>,
}

impl Iterator for RuleCursor {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let instants = self.instants.as_mut()?;
        match self.floor.take() {
            Some(floor) => instants
                .by_ref()
                .map(|instant| instant.naive_utc())
                .find(|instant| *instant >= floor),
            None => instants.next().map(|instant| instant.naive_utc()),
        }
    }
}
