//! Calendar quarters and half-open date windows.

pub mod quarter;
pub mod window;


pub use quarter::{
    MAX_QUARTERS, QuarterWindow, first_quarter_start, generate_windows, next_quarter_start,
    quarter_label, quarter_of, span_of,
};
pub use window::{DateWindow, date_ranges_overlap, validate_date_range};
