mod agenda;
mod calendar;
mod error;
mod event;
mod occurrence;
mod occurrences_after;
mod reconciler;
mod rule;
mod shared;
mod timespan;

pub use agenda::{structured_agenda, AgendaDay, AgendaSlot, EventHierarchy};
pub use calendar::Calendar;
pub use error::DomainError;
pub use event::Event;
pub use occurrence::Occurrence;
pub use occurrences_after::OccurrencesAfter;
pub use reconciler::OccurrenceReconciler;
pub use rule::{RecurrenceRule, RuleCursor, RuleExpander};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{InvalidWeekDayError, RRuleFrequency, RRuleOptions, WeekDay};
pub use timespan::{InvalidTimeSpanError, TimeSpan};
