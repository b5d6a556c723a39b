//! Date windows
//!
//! An inclusive calendar-day range. An unset bound is open: an unset start
//! reaches back to 1000-01-01 and an unset end forward to 9999-12-31, so the
//! all-time window goes through the same fetch path as any other.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, AnalysisResult};

/// First day of the open "all-time" window
pub fn all_time_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Last day of the open "all-time" window
pub fn all_time_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Every logged meal
    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_all_time(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Reject a window whose start falls after its end
    pub fn validate(&self) -> AnalysisResult<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                Err(AnalysisError::InvalidRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Concrete inclusive bounds, with unset bounds opened up
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (
            self.start.unwrap_or_else(all_time_start),
            self.end.unwrap_or_else(all_time_end),
        )
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        let (start, end) = self.bounds();
        start <= day && day <= end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (None, None) => write!(f, "all time"),
            (Some(start), None) => write!(f, "{} onwards", start),
            (None, Some(end)) => write!(f, "up to {}", end),
            (Some(start), Some(end)) => write!(f, "{} to {}", start, end),
        }
    }
}
