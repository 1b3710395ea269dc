use chrono::{NaiveDate, NaiveDateTime};
use recur_scheduler_domain::{Event, RRuleFrequency, RecurrenceRule};
use recur_scheduler_infra::{SchedulerContext, StaticTimeSys};
use std::sync::Arc;

pub fn dt(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Inmemory context with the clock stuck at `now`
pub fn setup_context(now: NaiveDateTime) -> SchedulerContext {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx
}

pub async fn insert_event(
    ctx: &SchedulerContext,
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    rule: Option<(RRuleFrequency, &str)>,
) -> Event {
    let mut event = Event::new(title, start, end);
    if let Some((frequency, params)) = rule {
        let rule = RecurrenceRule::new(title, frequency, params);
        ctx.repos.rules.insert(&rule).await.unwrap();
        event.rule = Some(Arc::new(rule));
    }
    ctx.repos.events.insert(&event).await.unwrap();
    event
}
