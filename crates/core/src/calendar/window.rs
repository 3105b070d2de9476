//! Half-open date windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// A half-open date range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting empty or inverted ranges.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ReportError> {
        validate_date_range(from, to)?;
        Ok(Self { from, to })
    }

    /// Creates a window without checking `from < to`.
    pub(crate) const fn new_unchecked(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// First day in the window.
    #[must_use]
    pub const fn from_date(&self) -> NaiveDate {
        self.from
    }

    /// First day after the window.
    #[must_use]
    pub const fn to_date(&self) -> NaiveDate {
        self.to
    }

    /// Number of days covered.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }

    /// Returns true if `[from, to)` shares at least one day with this window.
    #[must_use]
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        date_ranges_overlap(self.from, self.to, from, to)
    }

    /// Intersection of `[from, to)` with this window, or `None` when they do not overlap.
    #[must_use]
    pub fn clip(&self, from: NaiveDate, to: NaiveDate) -> Option<Self> {
        let start = from.max(self.from);
        let end = to.min(self.to);
        (start < end).then_some(Self {
            from: start,
            to: end,
        })
    }

    /// Days shared by `[from, to)` and this window, clamped to `[0, self.days()]`.
    #[must_use]
    pub fn overlap_days(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        let days = (to.min(self.to) - from.max(self.from)).num_days();
        days.clamp(0, self.days().max(0))
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// Validates that `start` is strictly before `end`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ReportError> {
    if start >= end {
        return Err(ReportError::InvalidRange { start, end });
    }
    Ok(())
}

/// Checks if two half-open ranges overlap.
///
/// `[a_start, a_end)` and `[b_start, b_end)` overlap if
/// `a_end > b_start AND a_start < b_end`. Touching ranges do not overlap.
#[must_use]
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_end > b_start && a_start < b_end
}
