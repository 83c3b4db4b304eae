//! Time dimension derivation
//!
//! The time dimension is derived from the calendar keys sessions actually
//! produced, not from the configured window, so it never carries unused dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::TimeKey;

/// One `Dim_Time` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRow {
    /// `YYYYMMDD` key
    pub time_key: TimeKey,
    /// Calendar date
    pub date: NaiveDate,
    /// Year
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day of month
    pub day: u32,
    /// Day of week, Monday = 0
    pub weekday: u32,
}

impl TimeRow {
    /// Derive the calendar fields of a key
    pub fn from_key(time_key: TimeKey) -> SimulationResult<Self> {
        let date = time_key.to_date().ok_or(SimulationError::InvalidTimeKey(time_key))?;
        Ok(Self {
            time_key,
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().num_days_from_monday(),
        })
    }
}

/// Time lookup table sorted by key
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeDimension {
    rows: Vec<TimeRow>,
}

impl TimeDimension {
    /// Build one row per distinct key, ascending
    pub fn derive<I>(keys: I) -> SimulationResult<Self>
    where
        I: IntoIterator<Item = TimeKey>,
    {
        let distinct: BTreeSet<TimeKey> = keys.into_iter().collect();
        let rows = distinct.into_iter().map(TimeRow::from_key).collect::<SimulationResult<Vec<_>>>()?;
        debug!("Derived {} time dimension rows", rows.len());
        Ok(Self { rows })
    }

    /// Whether `key` names a row
    pub fn contains_key(&self, key: TimeKey) -> bool {
        self.rows.binary_search_by_key(&key, |row| row.time_key).is_ok()
    }

    /// Rows in key order
    pub fn rows(&self) -> &[TimeRow] {
        &self.rows
    }

    /// Number of distinct dates
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no dates were seen
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_sorted_keys() {
        let keys = [TimeKey(20240310), TimeKey(20240102), TimeKey(20240310), TimeKey(20240215)];
        let dimension = TimeDimension::derive(keys).unwrap();

        let derived: Vec<TimeKey> = dimension.rows().iter().map(|row| row.time_key).collect();
        assert_eq!(derived, vec![TimeKey(20240102), TimeKey(20240215), TimeKey(20240310)]);
        assert!(dimension.contains_key(TimeKey(20240215)));
        assert!(!dimension.contains_key(TimeKey(20240216)));
    }

    #[test]
    fn test_calendar_fields() {
        // 2024-01-01 was a Monday, 2024-03-10 a Sunday
        let monday = TimeRow::from_key(TimeKey(20240101)).unwrap();
        assert_eq!((monday.year, monday.month, monday.day, monday.weekday), (2024, 1, 1, 0));

        let sunday = TimeRow::from_key(TimeKey(20240310)).unwrap();
        assert_eq!(sunday.weekday, 6);
        assert_eq!(sunday.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_invalid_key_is_an_error() {
        let result = TimeDimension::derive([TimeKey(20240230)]);
        assert!(matches!(result, Err(SimulationError::InvalidTimeKey(TimeKey(20240230)))));
    }

    #[test]
    fn test_empty_input() {
        assert!(TimeDimension::derive(Vec::new()).unwrap().is_empty());
    }
}
