use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum allowed duration in days for querying the occurrences of an
    /// `Event`. This is used to avoid having clients ask for occurrences in a
    /// timespan of several years which will take a lot of time to compute
    /// and is also not very useful information to query about anyways.
    pub occurrences_query_duration_limit_days: i64,
    /// Maximum number of occurrences returned when asking for the upcoming
    /// occurrences of an `Event`
    pub upcoming_occurrences_limit: usize,
    /// Name of the `Calendar` assigned to events created without one
    pub default_calendar_name: String,
}

const DEFAULT_OCCURRENCES_QUERY_DURATION_LIMIT_DAYS: i64 = 366;
const DEFAULT_UPCOMING_OCCURRENCES_LIMIT: usize = 100;
const DEFAULT_CALENDAR_NAME: &str = "default";

fn parse_env_var<T: FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => {
            info!(
                "Did not find {} environment variable. Using the default: {}.",
                name, default
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let occurrences_query_duration_limit_days = parse_env_var(
            "OCCURRENCES_QUERY_DURATION_LIMIT_DAYS",
            DEFAULT_OCCURRENCES_QUERY_DURATION_LIMIT_DAYS,
        );
        let upcoming_occurrences_limit = parse_env_var(
            "UPCOMING_OCCURRENCES_LIMIT",
            DEFAULT_UPCOMING_OCCURRENCES_LIMIT,
        );
        let default_calendar_name = match std::env::var("DEFAULT_CALENDAR_NAME") {
            Ok(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_CALENDAR_NAME.into(),
        };

        Self {
            occurrences_query_duration_limit_days,
            upcoming_occurrences_limit,
            default_calendar_name,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
