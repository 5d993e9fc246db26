//! Calendar dates for measurements and checkpoints
//!
//! The ledger works on calendar dates only. Cut-off filtering compares parsed
//! `NaiveDate` values, which orders exactly like zero-padded `YYYY-MM-DD`
//! strings do, without depending on every producer formatting dates the same way.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Errors related to temporal input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Parses a strict ISO-8601 calendar date (`YYYY-MM-DD`)
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| TemporalError::InvalidDate(raw.to_string()))
}

/// Parses a date as operators and importers actually write it
///
/// Accepted forms, in order:
/// - `YYYY-MM-DD`
/// - an RFC 3339 timestamp, of which only the date part is kept
/// - `DD/MM/YYYY`
pub fn parse_date_lenient(raw: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = raw.trim();
    if let Ok(date) = parse_iso_date(trimmed) {
        return Ok(date);
    }
    if let Some((date_part, _)) = trimmed.split_once('T') {
        if let Ok(date) = parse_iso_date(date_part) {
            return Ok(date);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .map_err(|_| TemporalError::InvalidDate(raw.to_string()))
}

/// Timezone of the construction site
///
/// Wraps chrono_tz::Tz with custom serialization support. "Today" for a new
/// checkpoint is the calendar date at the site, not on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timezone::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Europe::Rome)
    }
}
