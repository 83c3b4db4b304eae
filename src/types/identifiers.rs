//! Identifier types for the conversation analytics simulator
//!
//! This module contains the sequential, zero-padded identifier types for users
//! and sessions, and the `YYYYMMDD` calendar key shared by sessions and the time
//! dimension.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier for a simulated user (`U` followed by a 6-digit, 0-based index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u32);

impl UserId {
    /// Create the identifier for the user at `index` in the population
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the user in the population
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{:06}", self.0)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s
            .strip_prefix('U')
            .ok_or_else(|| serde::de::Error::custom(format!("user id without U prefix: {}", s)))?;
        digits.parse().map(UserId).map_err(serde::de::Error::custom)
    }
}

/// Identifier for a simulated session (`S` followed by a 7-digit, 1-based sequence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u32);

impl SessionId {
    /// Create the identifier for the session with 1-based `sequence`
    pub fn from_sequence(sequence: usize) -> Self {
        Self(sequence as u32)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:07}", self.0)
    }
}

impl Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s
            .strip_prefix('S')
            .ok_or_else(|| serde::de::Error::custom(format!("session id without S prefix: {}", s)))?;
        digits.parse().map(SessionId).map_err(serde::de::Error::custom)
    }
}

/// Calendar key in `YYYYMMDD` form, e.g. `20240105`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeKey(pub u32);

impl TimeKey {
    /// Build the key for a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.year() as u32 * 10_000 + date.month() * 100 + date.day())
    }

    /// Parse the key back into a calendar date, `None` if it names no real day
    pub fn to_date(&self) -> Option<NaiveDate> {
        let year = (self.0 / 10_000) as i32;
        let month = (self.0 / 100) % 100;
        let day = self.0 % 100;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_zero_padded() {
        assert_eq!(UserId::from_index(0).to_string(), "U000000");
        assert_eq!(UserId::from_index(4321).to_string(), "U004321");
    }

    #[test]
    fn test_session_id_is_zero_padded() {
        assert_eq!(SessionId::from_sequence(1).to_string(), "S0000001");
        assert_eq!(SessionId::from_sequence(12_345).to_string(), "S0012345");
    }

    #[test]
    fn test_identifiers_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&UserId(7)).unwrap(), "\"U000007\"");
        let parsed: SessionId = serde_json::from_str("\"S0000042\"").unwrap();
        assert_eq!(parsed, SessionId(42));
        assert!(serde_json::from_str::<UserId>("\"X000001\"").is_err());
    }

    #[test]
    fn test_time_key_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let key = TimeKey::from_date(date);
        assert_eq!(key, TimeKey(20240309));
        assert_eq!(key.to_date(), Some(date));
    }

    #[test]
    fn test_time_key_rejects_impossible_dates() {
        assert_eq!(TimeKey(20240231).to_date(), None);
        assert_eq!(TimeKey(20241301).to_date(), None);
    }
}
