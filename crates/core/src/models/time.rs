use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{EngineError, EngineResult};

/// A bookable time-of-day in canonical `HH:MM` form (24-hour, zero-padded).
///
/// The derived `Ord` is the lexicographic string order, which is
/// chronologically correct for this format. Values can only be built through
/// [`TimeSlot::parse`], so a `TimeSlot` in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    /// Parses a slot string, enforcing the exact `HH:MM` shape with
    /// hour in `[00,23]` and minute in `[00,59]`. `"9:00"` is rejected;
    /// `"09:00"` is accepted.
    pub fn parse(raw: &str) -> EngineResult<Self> {
        let bytes = raw.as_bytes();
        let shaped = bytes.len() == 5
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[2] == b':'
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();
        if !shaped {
            return Err(EngineError::InvalidSlotFormat(raw.to_string()));
        }

        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        if hour > 23 || minute > 59 {
            return Err(EngineError::InvalidSlotFormat(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TimeSlot::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The canonical, time-stripped identity of a calendar day.
///
/// Two dates representing the same calendar day always produce an identical
/// key regardless of any time-of-day component; the serialized form is the
/// zero-padded `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Strips the time-of-day component of a UTC instant.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                EngineError::Validation(format!("invalid calendar date {year}-{month}-{day}"))
            })
    }

    pub fn parse(raw: &str) -> EngineResult<Self> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| {
                EngineError::Validation(format!("invalid date key {raw:?}, expected YYYY-MM-DD"))
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Weekday index with 0 = Sunday through 6 = Saturday.
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Sorts a slot list ascending and rejects duplicates, so every stored list
/// satisfies the unique-and-ascending invariant.
pub fn normalize_slots(mut slots: Vec<TimeSlot>) -> EngineResult<Vec<TimeSlot>> {
    slots.sort();
    for pair in slots.windows(2) {
        if pair[0] == pair[1] {
            return Err(EngineError::DuplicateSlot(pair[0].clone()));
        }
    }
    Ok(slots)
}
