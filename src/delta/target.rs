//! Countdown target representations and their normalization

use std::{
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::CountdownError;

/// The instant a countdown counts toward, in any accepted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Epoch milliseconds
    Millis(i64),
    /// ISO-8601 text, parsed on normalization
    Text(String),
    /// Structured date/time
    DateTime(DateTime<Utc>),
}

impl Target {
    /// Resolve to epoch milliseconds
    pub fn to_epoch_millis(&self) -> Result<i64, CountdownError> {
        match self {
            Target::Millis(ms) => Ok(*ms),
            Target::DateTime(dt) => Ok(dt.timestamp_millis()),
            Target::Text(text) => parse_text(text),
        }
    }
}

fn parse_text(text: &str) -> Result<i64, CountdownError> {
    let trimmed = text.trim();

    if let Ok(ms) = trimmed.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp_millis());
    }
    // No offset given: treated as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }

    Err(CountdownError::invalid_target(format!("cannot parse {:?} as a date", text)))
}

impl FromStr for Target {
    type Err = CountdownError;

    /// Validates eagerly so bad input is rejected at the boundary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_text(s)?;
        Ok(Target::Text(s.to_string()))
    }
}

impl From<i64> for Target {
    fn from(ms: i64) -> Self {
        Target::Millis(ms)
    }
}

impl From<&str> for Target {
    fn from(text: &str) -> Self {
        Target::Text(text.to_string())
    }
}

impl From<String> for Target {
    fn from(text: String) -> Self {
        Target::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Target {
    fn from(dt: DateTime<Tz>) -> Self {
        Target::DateTime(dt.with_timezone(&Utc))
    }
}

impl TryFrom<SystemTime> for Target {
    type Error = CountdownError;

    fn try_from(time: SystemTime) -> Result<Self, Self::Error> {
        let out_of_range = || CountdownError::invalid_target(format!("{:?} is out of range", time));
        let ms = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).map_err(|_| out_of_range())?,
            Err(before) => {
                let ms = i64::try_from(before.duration().as_millis()).map_err(|_| out_of_range())?;
                -ms
            }
        };
        Ok(Target::Millis(ms))
    }
}
