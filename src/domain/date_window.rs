use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{HotelError, Result};

/// Parse a `YYYY-MM-DD` string, naming the offending field on failure.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        HotelError::validation(format!(
            "invalid {field} date format '{value}', expected YYYY-MM-DD"
        ))
    })
}

/// Query window over calendar days, inclusive on both ends.
///
/// A window whose end precedes its start is empty: it has zero days and
/// overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window from `days` days before `as_of` through `as_of`, both ends
    /// inclusive, so it spans `days + 1` calendar days.
    pub fn trailing(as_of: NaiveDate, days: u32) -> Self {
        let start = as_of - TimeDelta::days(i64::from(days));
        Self { start, end: as_of }
    }

    /// Window over the nights of a stay `[check_in, check_out)`.
    pub fn for_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(HotelError::InvalidRange {
                start: check_in,
                end: check_out,
            });
        }
        Ok(Self {
            start: check_in,
            end: check_out - TimeDelta::days(1),
        })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_date("start", start)?,
            end: parse_date("end", end)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// `(end - start) + 1`, or 0 for an empty window.
    pub fn len_days(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let days = (self.end - self.start).num_days() + 1;
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
