//! Acquisition date windows

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::{GrabError, GrabResult};

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> GrabResult<Self> {
        if end <= start {
            return Err(GrabError::ConfigError(format!(
                "Date window end {} must be after start {}", end, start)));
        }
        Ok(DateWindow { start, end })
    }

    /// Window covering one calendar month
    ///
    /// December ends on January 1st of the following year.
    pub fn for_month(year: i32, month: u32) -> GrabResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| GrabError::ConfigError(format!("Invalid month {}-{}", year, month)))?;

        let (end_year, end_month) = if month < 12 { (year, month + 1) } else { (year + 1, 1) };
        let end = NaiveDate::from_ymd_opt(end_year, end_month, 1)
            .ok_or_else(|| GrabError::ConfigError(format!("Invalid month {}-{}", end_year, end_month)))?;

        Self::new(start, end)
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        date >= self.start && date < self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
