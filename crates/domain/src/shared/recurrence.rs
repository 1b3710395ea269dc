use crate::error::DomainError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RRuleFrequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

impl RRuleFrequency {
    /// The `FREQ` value of the frequency in an RFC 5545 RRULE
    pub fn as_rrule_str(&self) -> &'static str {
        match self {
            Self::Yearly => "YEARLY",
            Self::Monthly => "MONTHLY",
            Self::Weekly => "WEEKLY",
            Self::Daily => "DAILY",
            Self::Hourly => "HOURLY",
            Self::Minutely => "MINUTELY",
            Self::Secondly => "SECONDLY",
        }
    }
}

impl Display for RRuleFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_rrule_str())
    }
}

impl FromStr for RRuleFrequency {
    type Err = DomainError;

    fn from_str(freq: &str) -> Result<Self, Self::Err> {
        match freq.trim().to_uppercase().as_str() {
            "YEARLY" => Ok(Self::Yearly),
            "MONTHLY" => Ok(Self::Monthly),
            "WEEKLY" => Ok(Self::Weekly),
            "DAILY" => Ok(Self::Daily),
            "HOURLY" => Ok(Self::Hourly),
            "MINUTELY" => Ok(Self::Minutely),
            "SECONDLY" => Ok(Self::Secondly),
            _ => Err(DomainError::Configuration(format!(
                "Unknown frequency: {}",
                freq
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeekDay {
    n: Option<isize>,
    weekday: usize,
}

impl WeekDay {
    fn create(weekday: usize, n: Option<isize>) -> Result<Self, ()> {
        if !Self::is_valid_weekday(weekday) {
            return Err(());
        }
        if let Some(n) = n {
            if !Self::is_valid_n(n) {
                return Err(());
            }
        }
        Ok(Self { weekday, n })
    }

    pub fn nth(&self) -> Option<isize> {
        self.n
    }
    pub fn weekday(&self) -> usize {
        self.weekday
    }

    pub fn new(weekday: usize) -> Result<Self, ()> {
        Self::create(weekday, None)
    }

    pub fn new_nth(weekday: usize, n: isize) -> Result<Self, ()> {
        Self::create(weekday, Some(n))
    }

    fn is_valid_n(n: isize) -> bool {
        n != 0 && n < 500 && n > -500
    }

    fn is_valid_weekday(wday: usize) -> bool {
        wday <= 6
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n_prefix = match self.n {
            Some(n) => format!("{}", n),
            None => "".into(),
        };
        write!(f, "{}{}", n_prefix, weekday_to_str(self.weekday))
    }
}

fn str_to_weekday(d: &str) -> Result<usize, InvalidWeekDayError> {
    match d.to_uppercase().as_str() {
        "MO" => Ok(0),
        "TU" => Ok(1),
        "WE" => Ok(2),
        "TH" => Ok(3),
        "FR" => Ok(4),
        "SA" => Ok(5),
        "SU" => Ok(6),
        _ => Err(InvalidWeekDayError::InvalidWeekdayIdentifier(d.to_string())),
    }
}

fn weekday_to_str(wday: usize) -> &'static str {
    match wday {
        0 => "MO",
        1 => "TU",
        2 => "WE",
        3 => "TH",
        4 => "FR",
        5 => "SA",
        _ => "SU",
    }
}

#[derive(Error, Debug)]
pub enum InvalidWeekDayError {
    #[error("Invalid weekday specified: {0}")]
    InvalidWeekdayIdentifier(String),
    #[error("Malformed weekday: {0}")]
    Malformed(String),
}

impl FromStr for WeekDay {
    type Err = InvalidWeekDayError;

    fn from_str(day: &str) -> Result<Self, Self::Err> {
        let e = InvalidWeekDayError::Malformed(day.to_string());
        // Plain weekday index, Monday being 0
        if let Ok(index) = day.parse::<usize>() {
            return WeekDay::new(index).map_err(|_| e);
        }
        if day.len() < 2 || !day.is_char_boundary(day.len() - 2) {
            return Err(e);
        } else if day.len() == 2 {
            // MO, TU, ...
            let wday = str_to_weekday(day)?;
            WeekDay::new(wday).map_err(|_| e)
        } else {
            let wday = str_to_weekday(&day[day.len() - 2..])?;
            let n = match day[0..day.len() - 2].parse::<isize>() {
                Ok(n) => n,
                Err(_) => return Err(e),
            };
            WeekDay::new_nth(wday, n).map_err(|_| e)
        }
    }
}

impl Serialize for WeekDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WeekDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WeekDayVisitor;

        impl<'de> Visitor<'de> for WeekDayVisitor {
            type Value = WeekDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid string representation of weekday")
            }

            fn visit_str<E>(self, value: &str) -> Result<WeekDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<WeekDay>()
                    .map_err(|_| E::custom(format!("Malformed weekday: {}", value)))
            }
        }

        deserializer.deserialize_str(WeekDayVisitor)
    }
}

/// Parsed form of the `key:value[,value];key:value` parameter string
/// stored on a `RecurrenceRule`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RRuleOptions {
    pub interval: Option<u32>,
    pub count: Option<u32>,
    pub until: Option<NaiveDateTime>,
    pub bysetpos: Vec<i32>,
    pub bymonth: Vec<u32>,
    pub bymonthday: Vec<i32>,
    pub byyearday: Vec<i32>,
    pub byweekno: Vec<i32>,
    pub byweekday: Vec<WeekDay>,
    pub byhour: Vec<u32>,
    pub byminute: Vec<u32>,
    pub bysecond: Vec<u32>,
    pub wkst: Option<WeekDay>,
}

fn config_error(msg: String) -> DomainError {
    DomainError::Configuration(msg)
}

fn parse_single<'a>(key: &str, values: &[&'a str]) -> Result<&'a str, DomainError> {
    match values {
        [value] => Ok(*value),
        _ => Err(config_error(format!(
            "Parameter `{}` expects exactly one value",
            key
        ))),
    }
}

fn parse_ints<T: FromStr>(
    key: &str,
    values: &[&str],
    valid: impl Fn(&T) -> bool,
) -> Result<Vec<T>, DomainError> {
    values
        .iter()
        .map(|v| match v.parse::<T>() {
            Ok(n) if valid(&n) => Ok(n),
            _ => Err(config_error(format!(
                "Invalid value `{}` for parameter `{}`",
                v, key
            ))),
        })
        .collect()
}

fn parse_weekday(key: &str, value: &str) -> Result<WeekDay, DomainError> {
    value
        .parse::<WeekDay>()
        .map_err(|e| config_error(format!("Invalid value for parameter `{}`: {}", key, e)))
}

fn parse_until(value: &str) -> Result<NaiveDateTime, DomainError> {
    let value = value.trim_end_matches('Z');
    ["%Y%m%dT%H%M%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y%m%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| config_error(format!("Invalid value `{}` for parameter `until`", value)))
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl RRuleOptions {
    pub fn parse(params: &str) -> Result<Self, DomainError> {
        let mut options = Self::default();

        for param in params.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let mut parts = param.splitn(2, ':');
            let key = parts.next().unwrap_or_default().trim().to_lowercase();
            let values = parts
                .next()
                .ok_or_else(|| config_error(format!("Parameter `{}` has no value", key)))?
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>();
            if values.is_empty() {
                return Err(config_error(format!("Parameter `{}` has no value", key)));
            }

            match key.as_str() {
                "interval" => {
                    let interval = parse_ints::<u32>(&key, &[parse_single(&key, &values)?], |n| *n >= 1)?;
                    options.interval = interval.first().copied();
                }
                "count" => {
                    let count =
                        parse_ints::<u32>(&key, &[parse_single(&key, &values)?], |n| *n >= 1)?;
                    options.count = count.first().copied();
                }
                "until" => options.until = Some(parse_until(parse_single(&key, &values)?)?),
                "bysetpos" => {
                    options.bysetpos =
                        parse_ints(&key, &values, |n: &i32| *n != 0 && n.abs() <= 366)?
                }
                "bymonth" => options.bymonth = parse_ints(&key, &values, |n: &u32| (1..=12).contains(n))?,
                "bymonthday" => {
                    options.bymonthday =
                        parse_ints(&key, &values, |n: &i32| *n != 0 && n.abs() <= 31)?
                }
                "byyearday" => {
                    options.byyearday =
                        parse_ints(&key, &values, |n: &i32| *n != 0 && n.abs() <= 366)?
                }
                "byweekno" => {
                    options.byweekno =
                        parse_ints(&key, &values, |n: &i32| *n != 0 && n.abs() <= 53)?
                }
                "byweekday" | "byday" => {
                    options.byweekday = values
                        .iter()
                        .map(|v| parse_weekday(&key, v))
                        .collect::<Result<_, _>>()?
                }
                "byhour" => options.byhour = parse_ints(&key, &values, |n: &u32| *n <= 23)?,
                "byminute" => options.byminute = parse_ints(&key, &values, |n: &u32| *n <= 59)?,
                "bysecond" => options.bysecond = parse_ints(&key, &values, |n: &u32| *n <= 59)?,
                "wkst" => options.wkst = Some(parse_weekday(&key, parse_single(&key, &values)?)?),
                _ => return Err(config_error(format!("Unknown parameter: `{}`", key))),
            }
        }

        if options.count.is_some() && options.until.is_some() {
            return Err(config_error(
                "Parameters `count` and `until` cannot be combined".into(),
            ));
        }

        Ok(options)
    }

    /// Renders the options together with the given frequency as the
    /// value of an RFC 5545 RRULE property.
    pub fn to_rrule_string(&self, freq: RRuleFrequency) -> String {
        let mut parts = vec![format!("FREQ={}", freq.as_rrule_str())];
        if let Some(interval) = self.interval {
            parts.push(format!("INTERVAL={}", interval));
        }
        if let Some(count) = self.count {
            parts.push(format!("COUNT={}", count));
        }
        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
        }
        if let Some(wkst) = &self.wkst {
            parts.push(format!("WKST={}", weekday_to_str(wkst.weekday())));
        }
        let lists = [
            ("BYSETPOS", join(&self.bysetpos)),
            ("BYMONTH", join(&self.bymonth)),
            ("BYMONTHDAY", join(&self.bymonthday)),
            ("BYYEARDAY", join(&self.byyearday)),
            ("BYWEEKNO", join(&self.byweekno)),
            ("BYDAY", join(&self.byweekday)),
            ("BYHOUR", join(&self.byhour)),
            ("BYMINUTE", join(&self.byminute)),
            ("BYSECOND", join(&self.bysecond)),
        ];
        for (name, value) in lists.iter() {
            if !value.is_empty() {
                parts.push(format!("{}={}", name, value));
            }
        }
        parts.join(";")
    }
}
