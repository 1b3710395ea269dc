use chrono::{NaiveDateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current instant in UTC
    fn now(&self) -> NaiveDateTime;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// System that is stuck at a given instant
pub struct StaticTimeSys(pub NaiveDateTime);
impl ISys for StaticTimeSys {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
