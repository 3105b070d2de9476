//! Department salary reporting.
//!
//! This module provides pure business logic for apportioning time-varying
//! salaries across calendar quarters and department assignments:
//! - Interval apportionment at a flat daily rate
//! - Per-department aggregation within a window
//! - Quarter-by-department report assembly

pub mod aggregate;
pub mod apportion;
pub mod service;
pub mod source;
pub mod types;


pub use aggregate::{DepartmentAggregator, UNRESOLVED_DEPARTMENT};
pub use apportion::{DAYS_PER_YEAR, IntervalApportioner, RoundingPolicy, per_year, salary_days};
pub use service::ReportBuilder;
pub use source::{PayrollSnapshot, PayrollSource};
pub use types::*;
