//! Canonical date keys for the task map.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CampoError, CampoResult};

/// Canonical `YYYY-MM-DD` key indexing one day's task bucket.
///
/// Keys are derived from calendar dates in local time. They order
/// lexicographically, which for this format matches chronological order,
/// so the task map iterates in date order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateKey(String);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        DateKey(date.format("%Y-%m-%d").to_string())
    }

    /// The key for the current local date.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Parse and canonicalize a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> CampoResult<Self> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| CampoError::InvalidDateKey(s.to_string()))?;
        Ok(Self::from_date(date))
    }

    /// The calendar date this key was derived from.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
