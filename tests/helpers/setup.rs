use chrono::{NaiveDate, NaiveDateTime};
use recur_scheduler::infra::{SchedulerContext, StaticTimeSys};
use std::sync::Arc;

pub fn dt(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Inmemory application context with the clock stuck at `now`
pub fn spawn_app(now: NaiveDateTime) -> SchedulerContext {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx
}
