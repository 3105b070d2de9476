//! Calendar quarters and the quarter sequence that drives a report.
//!
//! Quarter boundaries are January, April, July and October 1:
//!
//! | month      | quarter | starts | next starts      |
//! |------------|---------|--------|------------------|
//! | 1, 2, 3    | Q1      | Jan 1  | Apr 1            |
//! | 4, 5, 6    | Q2      | Apr 1  | Jul 1            |
//! | 7, 8, 9    | Q3      | Jul 1  | Oct 1            |
//! | 10, 11, 12 | Q4      | Oct 1  | Jan 1 next year  |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::window::DateWindow;

/// Upper bound on the number of quarters in one report.
pub const MAX_QUARTERS: u32 = 12;

/// One reporting period: a calendar quarter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterWindow {
    /// First day of the quarter.
    pub from_date: NaiveDate,
    /// First day of the following quarter.
    pub to_date: NaiveDate,
    /// Display label, e.g. `"1996 Q2"`.
    pub label: String,
}

impl QuarterWindow {
    /// Builds the quarter containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let from_date = first_quarter_start(date);
        Self {
            from_date,
            to_date: next_quarter_start(from_date),
            label: quarter_label(from_date),
        }
    }

    /// The quarter as a half-open window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        DateWindow::new_unchecked(self.from_date, self.to_date)
    }
}

/// Quarter of the year (1-4) for `date`.
#[must_use]
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// First day of the quarter `quarter` (1-4) of `year`.
///
/// Saturates at `NaiveDate::MAX` past the end of the representable calendar.
fn quarter_start(year: i32, quarter: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1).unwrap_or(NaiveDate::MAX)
}

/// First day of the calendar quarter containing `date`.
#[must_use]
pub fn first_quarter_start(date: NaiveDate) -> NaiveDate {
    quarter_start(date.year(), quarter_of(date))
}

/// First day of the quarter following the one containing `date`.
#[must_use]
pub fn next_quarter_start(date: NaiveDate) -> NaiveDate {
    match quarter_of(date) {
        4 => quarter_start(date.year() + 1, 1),
        q => quarter_start(date.year(), q + 1),
    }
}

/// Label for the quarter containing `date`, formatted `"<year> Q<1-4>"`.
#[must_use]
pub fn quarter_label(date: NaiveDate) -> String {
    format!("{} Q{}", date.year(), quarter_of(date))
}

/// Generates up to [`MAX_QUARTERS`] consecutive quarters starting with the one containing `start`.
///
/// A `count` of zero yields an empty sequence.
#[must_use]
pub fn generate_windows(start: NaiveDate, count: u32) -> Vec<QuarterWindow> {
    let count = count.min(MAX_QUARTERS);
    let mut windows = Vec::with_capacity(count as usize);
    let mut next_start = first_quarter_start(start);

    for _ in 0..count {
        let next_end = next_quarter_start(next_start);
        windows.push(QuarterWindow {
            from_date: next_start,
            to_date: next_end,
            label: quarter_label(next_start),
        });
        next_start = next_end;
    }

    windows
}

/// The window covering every quarter in `windows`, or `None` when empty.
#[must_use]
pub fn span_of(windows: &[QuarterWindow]) -> Option<DateWindow> {
    let first = windows.first()?;
    let last = windows.last()?;
    Some(DateWindow::new_unchecked(first.from_date, last.to_date))
}
