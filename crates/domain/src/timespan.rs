use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Query window `[start, end)` used when asking an `Event` for its occurrences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSpan {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Like `new`, but rejects windows that end before they start
    pub fn create(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InvalidTimeSpanError> {
        if end < start {
            Err(InvalidTimeSpanError(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn greater_than(&self, duration: Duration) -> bool {
        self.duration() > duration
    }
}

#[derive(Debug)]
pub struct InvalidTimeSpanError(NaiveDateTime, NaiveDateTime);

impl Error for InvalidTimeSpanError {}

impl std::fmt::Display for InvalidTimeSpanError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Provided timespan start: {} and end: {} is invalid. The end should not be before the start.",
            self.0, self.1
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn rejects_reversed_timespan() {
        assert!(TimeSpan::create(date(2), date(1)).is_err());
        assert!(TimeSpan::create(date(1), date(1)).is_ok());
    }

    #[test]
    fn compares_length() {
        let ts = TimeSpan::new(date(1), date(8));
        assert_eq!(ts.duration(), Duration::days(7));
        assert!(ts.greater_than(Duration::days(6)));
        assert!(!ts.greater_than(Duration::days(7)));
    }
}
