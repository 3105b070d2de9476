//! Pro-rata apportionment of annual salaries over a date window.
//!
//! Salaries accrue at a flat daily rate of `amount / 365`. Leap days earn the
//! same rate as any other day, so a salary held for a whole leap year
//! apportions to `amount × 366 / 365`.

use chrono::NaiveDate;
use payspan_shared::{ReportConfig, RoundingMode, RoundingStage};
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::SalaryInterval;
use crate::calendar::DateWindow;

/// Days per year used for the daily rate.
pub const DAYS_PER_YEAR: i64 = 365;

/// How and where apportioned amounts are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoundingPolicy {
    /// Rounding mode.
    pub mode: RoundingMode,
    /// Stage at which the mode applies.
    pub stage: RoundingStage,
}

impl RoundingPolicy {
    /// Creates a rounding policy.
    #[must_use]
    pub const fn new(mode: RoundingMode, stage: RoundingStage) -> Self {
        Self { mode, stage }
    }

    /// Applies the mode to `amount` regardless of stage.
    #[must_use]
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self.mode {
            RoundingMode::None => amount,
            RoundingMode::Floor => amount.floor(),
            RoundingMode::Round => {
                amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            }
        }
    }

    /// Rounding for a single apportionment.
    #[must_use]
    pub fn for_apportionment(self, amount: Decimal) -> Decimal {
        match self.stage {
            RoundingStage::PerApportionment => self.apply(amount),
            RoundingStage::FinalTotal => amount,
        }
    }

    /// Rounding for a department's quarter total.
    #[must_use]
    pub fn for_final_total(self, amount: Decimal) -> Decimal {
        match self.stage {
            RoundingStage::PerApportionment => amount,
            RoundingStage::FinalTotal => self.apply(amount),
        }
    }
}

impl From<ReportConfig> for RoundingPolicy {
    fn from(config: ReportConfig) -> Self {
        Self::new(config.rounding_mode, config.rounding_stage)
    }
}

/// `Σ amount × overlap_days` of `salaries` within `[window_from, window_to)`.
///
/// Exact integer arithmetic: splitting a window never gains or loses a
/// salary-day. An empty or inverted window yields zero.
#[must_use]
pub fn salary_days(
    window_from: NaiveDate,
    window_to: NaiveDate,
    salaries: &[SalaryInterval],
) -> Decimal {
    if window_from >= window_to {
        return Decimal::ZERO;
    }
    let window = DateWindow::new_unchecked(window_from, window_to);

    salaries
        .iter()
        .map(|salary| {
            let days = window.overlap_days(salary.from_date, salary.to_date);
            Decimal::from(salary.amount) * Decimal::from(days)
        })
        .sum()
}

/// Converts salary-days to an amount at the daily rate of `1 / 365`.
#[must_use]
pub fn per_year(salary_days: Decimal) -> Decimal {
    salary_days / Decimal::from(DAYS_PER_YEAR)
}

/// Computes the salary earned during a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalApportioner {
    rounding: RoundingPolicy,
}

impl IntervalApportioner {
    /// Creates an apportioner with the given rounding policy.
    #[must_use]
    pub const fn new(rounding: RoundingPolicy) -> Self {
        Self { rounding }
    }

    /// The rounding policy in use.
    #[must_use]
    pub const fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Amount earned across `salaries` during `[window_from, window_to)`.
    ///
    /// Each interval contributes `overlap_days × amount / 365`. Intervals outside
    /// the window contribute nothing. An empty or inverted window earns zero.
    ///
    /// The division by 365 rounds at the 28th significant digit, so the two
    /// halves of a split window add up to the whole within `1e-20`, not exactly.
    /// [`salary_days`] is the exactly additive quantity.
    #[must_use]
    pub fn apportion(
        &self,
        window_from: NaiveDate,
        window_to: NaiveDate,
        salaries: &[SalaryInterval],
    ) -> Decimal {
        self.rounding
            .for_apportionment(per_year(salary_days(window_from, window_to, salaries)))
    }
}
