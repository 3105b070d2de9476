//! Shared identifiers, errors, and configuration for Payspan.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for employees and departments
//! - Application-wide error types
//! - Configuration management, including the report rounding contract

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ReportConfig, RoundingMode, RoundingStage};
pub use error::{AppError, AppResult};
