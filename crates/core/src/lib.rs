//! Core business logic for Payspan.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Everything arrives as in-memory collections handed over by a data source.
//!
//! # Modules
//!
//! - `calendar` - Calendar quarters and half-open date windows
//! - `payroll` - Salary apportionment, department aggregation, and report assembly
//! - `error` - Report errors

pub mod calendar;
pub mod error;
pub mod payroll;

pub use error::ReportError;
pub use payroll::{PayrollSnapshot, PayrollSource, ReportBuilder, ReportMatrix};
