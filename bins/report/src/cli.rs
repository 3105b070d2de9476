//! Command line arguments.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use payspan_shared::{ReportConfig, RoundingMode};

/// Largest quarter count accepted from the command line.
pub const MAX_REQUESTED_QUARTERS: u32 = 40;

/// Years at or before this one are rejected.
const MIN_YEAR_EXCLUSIVE: i32 = 1980;

/// Quarterly salary totals per department.
#[derive(Debug, Parser)]
#[command(name = "payspan")]
#[command(about = "Quarterly department salary report")]
pub struct Args {
    /// Start the report on January 1st of this year (after 1980).
    #[arg(long, conflicts_with = "start", value_parser = parse_year)]
    pub year: Option<i32>,

    /// Start the report on the quarter containing this date (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Number of quarters to report (at most 12 are produced).
    #[arg(long, short = 'q')]
    pub quarters: Option<u32>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Override the configured rounding mode.
    #[arg(long, value_enum)]
    pub rounding: Option<RoundingArg>,

    /// Aggregate quarters in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Print the span of assignment start dates and exit.
    #[arg(long)]
    pub range: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Rounding mode as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoundingArg {
    /// Full precision.
    None,
    /// Round down to whole units.
    Floor,
    /// Round half to even.
    Round,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::None => Self::None,
            RoundingArg::Floor => Self::Floor,
            RoundingArg::Round => Self::Round,
        }
    }
}

fn parse_year(value: &str) -> Result<i32, String> {
    let year: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a year"))?;
    if year <= MIN_YEAR_EXCLUSIVE || NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
        return Err(format!("year must be after {MIN_YEAR_EXCLUSIVE}, got {year}"));
    }
    Ok(year)
}

impl Args {
    /// Requested start date, if any.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start
            .or_else(|| self.year.and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)))
    }

    /// Requested quarter count, falling back to `default` and capped.
    pub fn quarter_count(&self, default: u32) -> u32 {
        self.quarters.unwrap_or(default).min(MAX_REQUESTED_QUARTERS)
    }

    /// Report configuration with command line overrides applied.
    pub fn report_config(&self, base: ReportConfig) -> ReportConfig {
        ReportConfig {
            rounding_mode: self.rounding.map_or(base.rounding_mode, RoundingMode::from),
            ..base
        }
    }
}
