//! Quarter-by-department report assembly.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use payspan_shared::ReportConfig;
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::aggregate::{
    DepartmentAggregator, DepartmentNames, department_names, group_salaries_by_employee,
};
use super::apportion::{IntervalApportioner, RoundingPolicy};
use super::source::PayrollSource;
use super::types::{DepartmentTotals, ReportMatrix};
use crate::calendar::{QuarterWindow, generate_windows};
use crate::error::ReportError;

/// Builds quarterly department salary reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder {
    config: ReportConfig,
    rounding: RoundingPolicy,
    aggregator: DepartmentAggregator,
}

/// Everything resolved before any window is aggregated.
struct ReportPlan {
    windows: Vec<QuarterWindow>,
    names: DepartmentNames,
    rows: BTreeSet<String>,
}

impl ReportBuilder {
    /// Creates a builder from report configuration.
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        let rounding = RoundingPolicy::from(config);
        Self {
            config,
            rounding,
            aggregator: DepartmentAggregator::new(IntervalApportioner::new(rounding)),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Builds the report for `quarters` quarters (at most 12) from `start`.
    ///
    /// Without a start date the report begins at the earliest assignment.
    /// `None` for `quarters` uses the configured default.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoData`] when there are no departments or no start
    /// date can be resolved.
    pub fn build_report<S: PayrollSource>(
        &self,
        source: &S,
        start: Option<NaiveDate>,
        quarters: Option<u32>,
    ) -> Result<ReportMatrix, ReportError> {
        let plan = self.plan(source, start, quarters)?;
        let totals = plan
            .windows
            .iter()
            .map(|window| self.aggregate_window(source, window, &plan.names))
            .collect();
        Ok(self.assemble(plan, totals))
    }

    /// Same result as [`Self::build_report`], aggregating quarters in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoData`] when there are no departments or no start
    /// date can be resolved.
    pub fn build_report_parallel<S: PayrollSource + Sync>(
        &self,
        source: &S,
        start: Option<NaiveDate>,
        quarters: Option<u32>,
    ) -> Result<ReportMatrix, ReportError> {
        let plan = self.plan(source, start, quarters)?;
        let totals = plan
            .windows
            .par_iter()
            .map(|window| self.aggregate_window(source, window, &plan.names))
            .collect();
        Ok(self.assemble(plan, totals))
    }

    fn plan<S: PayrollSource>(
        &self,
        source: &S,
        start: Option<NaiveDate>,
        quarters: Option<u32>,
    ) -> Result<ReportPlan, ReportError> {
        let start = match start {
            Some(date) => date,
            None => source
                .earliest_assignment_start()
                .ok_or(ReportError::NoData)?,
        };
        let windows = generate_windows(start, quarters.unwrap_or(self.config.default_quarters));

        let departments = source.list_departments();
        if departments.is_empty() {
            return Err(ReportError::NoData);
        }

        tracing::debug!(
            %start,
            quarters = windows.len(),
            departments = departments.len(),
            "Building department salary report"
        );

        Ok(ReportPlan {
            windows,
            names: department_names(&departments),
            rows: departments.into_iter().map(|d| d.name).collect(),
        })
    }

    fn aggregate_window<S: PayrollSource>(
        &self,
        source: &S,
        window: &QuarterWindow,
        names: &DepartmentNames,
    ) -> DepartmentTotals {
        let salaries = source.fetch_salary_intervals(window.from_date, window.to_date);
        let assignments = source.fetch_assignment_intervals(window.from_date, window.to_date);
        tracing::debug!(
            quarter = %window.label,
            salaries = salaries.len(),
            assignments = assignments.len(),
            "Aggregating quarter"
        );

        let salaries = group_salaries_by_employee(salaries);
        self.aggregator
            .aggregate(&window.window(), &assignments, &salaries, names)
    }

    fn assemble(&self, plan: ReportPlan, totals: Vec<DepartmentTotals>) -> ReportMatrix {
        let mut rows: BTreeMap<String, Vec<Decimal>> = plan
            .rows
            .into_iter()
            .map(|name| (name, Vec::with_capacity(plan.windows.len())))
            .collect();

        for window_totals in &totals {
            for (name, row) in &mut rows {
                let total = window_totals.get(name).copied().unwrap_or(Decimal::ZERO);
                row.push(self.rounding.for_final_total(total));
            }
        }

        let labels = plan.windows.into_iter().map(|w| w.label).collect();
        ReportMatrix::new(labels, rows)
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}
