//! Application configuration management.

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Report configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    8
}

/// How apportioned salary amounts are reduced to whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Keep full decimal precision.
    #[default]
    None,
    /// Truncate toward negative infinity.
    Floor,
    /// Round half to even.
    Round,
}

/// Where the rounding mode is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingStage {
    /// Every single apportionment (one employee, one assignment, one quarter).
    PerApportionment,
    /// Only the per-department quarter total.
    #[default]
    FinalTotal,
}

/// Report configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportConfig {
    /// Quarters reported when the caller does not ask for a count.
    #[serde(default = "default_quarters")]
    pub default_quarters: u32,
    /// Rounding mode for salary amounts.
    #[serde(default)]
    pub rounding_mode: RoundingMode,
    /// Stage at which `rounding_mode` applies.
    #[serde(default)]
    pub rounding_stage: RoundingStage,
}

fn default_quarters() -> u32 {
    4
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_quarters: default_quarters(),
            rounding_mode: RoundingMode::default(),
            rounding_stage: RoundingStage::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAYSPAN").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.default_quarters, 4);
        assert_eq!(config.rounding_mode, RoundingMode::None);
        assert_eq!(config.rounding_stage, RoundingStage::FinalTotal);
    }

    #[test]
    fn test_rounding_mode_deserialize() {
        let mode: RoundingMode = serde_json::from_str("\"floor\"").unwrap();
        assert_eq!(mode, RoundingMode::Floor);

        let stage: RoundingStage = serde_json::from_str("\"per_apportionment\"").unwrap();
        assert_eq!(stage, RoundingStage::PerApportionment);

        assert!(serde_json::from_str::<RoundingMode>("\"ceil\"").is_err());
    }

    #[test]
    fn test_report_section_partial() {
        let config: AppConfig = serde_json::from_str(
            r#"{"database": {"url": "postgres://localhost/employees"}, "report": {"rounding_mode": "round"}}"#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.report.default_quarters, 4);
        assert_eq!(config.report.rounding_mode, RoundingMode::Round);
        assert_eq!(config.report.rounding_stage, RoundingStage::FinalTotal);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-env-only")),
                ("PAYSPAN__DATABASE__URL", Some("postgres://db:5432/employees")),
                ("PAYSPAN__REPORT__ROUNDING_MODE", Some("floor")),
                ("PAYSPAN__REPORT__DEFAULT_QUARTERS", Some("8")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://db:5432/employees");
                assert_eq!(config.report.rounding_mode, RoundingMode::Floor);
                assert_eq!(config.report.default_quarters, 8);
            },
        );
    }

    #[test]
    fn test_load_without_database_url_fails() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-env-only")),
                ("PAYSPAN__DATABASE__URL", None::<&str>),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert_eq!(err.error_code(), "CONFIG_ERROR");
            },
        );
    }
}
