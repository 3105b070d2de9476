//! Report error types.

use chrono::NaiveDate;
use payspan_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// There is nothing to report on: no departments, or no start date could be resolved.
    #[error("No departments found")]
    NoData,

    /// A window or interval does not satisfy `start < end`.
    #[error("Invalid date range: start {start} is not before end {end}")]
    InvalidRange {
        /// Start date (inclusive).
        start: NaiveDate,
        /// End date (exclusive).
        end: NaiveDate,
    },
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NoData => Self::NoData(err.to_string()),
            ReportError::InvalidRange { .. } => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_maps_to_app_no_data() {
        let err: AppError = ReportError::NoData.into();
        assert_eq!(err.error_code(), "NO_DATA");
        assert_eq!(err.to_string(), "No data: No departments found");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = ReportError::InvalidRange {
            start: NaiveDate::from_ymd_opt(1997, 6, 22).unwrap(),
            end: NaiveDate::from_ymd_opt(1996, 4, 2).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 1997-06-22 is not before end 1996-04-02"
        );

        let app: AppError = err.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
