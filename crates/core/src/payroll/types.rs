//! Payroll data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use payspan_shared::types::{DepartmentId, EmployeeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{date_ranges_overlap, validate_date_range};
use crate::error::ReportError;

/// The far-future `to_date` meaning "still in effect".
#[must_use]
pub fn open_ended() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// An annual salary in effect over `[from_date, to_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInterval {
    /// Employee receiving the salary.
    pub employee_id: EmployeeId,
    /// Annual amount in whole currency units.
    pub amount: i64,
    /// First day the salary applies.
    pub from_date: NaiveDate,
    /// First day the salary no longer applies.
    pub to_date: NaiveDate,
}

impl SalaryInterval {
    /// Creates a salary interval, rejecting `from_date >= to_date`.
    pub fn new(
        employee_id: EmployeeId,
        amount: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Self, ReportError> {
        validate_date_range(from_date, to_date)?;
        Ok(Self {
            employee_id,
            amount,
            from_date,
            to_date,
        })
    }

    /// Returns true if the salary is in effect on any day of `[from, to)`.
    #[must_use]
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        date_ranges_overlap(self.from_date, self.to_date, from, to)
    }

    /// Returns true if the salary has no known end.
    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.to_date >= open_ended()
    }
}

/// An employee's membership of a department over `[from_date, to_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInterval {
    /// Assigned employee.
    pub employee_id: EmployeeId,
    /// Department the employee belongs to.
    pub department_id: DepartmentId,
    /// First day of the assignment.
    pub from_date: NaiveDate,
    /// First day after the assignment.
    pub to_date: NaiveDate,
}

impl AssignmentInterval {
    /// Creates an assignment interval, rejecting `from_date >= to_date`.
    pub fn new(
        employee_id: EmployeeId,
        department_id: DepartmentId,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Self, ReportError> {
        validate_date_range(from_date, to_date)?;
        Ok(Self {
            employee_id,
            department_id,
            from_date,
            to_date,
        })
    }

    /// Returns true if the assignment covers any day of `[from, to)`.
    #[must_use]
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        date_ranges_overlap(self.from_date, self.to_date, from, to)
    }
}

/// An organizational department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department code.
    pub id: DepartmentId,
    /// Unique display name.
    pub name: String,
}

impl Department {
    /// Creates a department.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(id),
            name: name.into(),
        }
    }
}

/// Department name to total amount for a single window.
pub type DepartmentTotals = BTreeMap<String, Decimal>;

/// Quarter-by-department salary totals.
///
/// Every department row holds exactly one total per quarter label, in label order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMatrix {
    quarters: Vec<String>,
    departments: BTreeMap<String, Vec<Decimal>>,
}

impl ReportMatrix {
    pub(crate) fn new(quarters: Vec<String>, departments: BTreeMap<String, Vec<Decimal>>) -> Self {
        debug_assert!(departments.values().all(|row| row.len() == quarters.len()));
        Self {
            quarters,
            departments,
        }
    }

    /// Quarter labels, oldest first.
    #[must_use]
    pub fn quarters(&self) -> &[String] {
        &self.quarters
    }

    /// Totals per department name, aligned with [`Self::quarters`].
    #[must_use]
    pub fn departments(&self) -> &BTreeMap<String, Vec<Decimal>> {
        &self.departments
    }

    /// The row for one department.
    #[must_use]
    pub fn department(&self, name: &str) -> Option<&[Decimal]> {
        self.departments.get(name).map(Vec::as_slice)
    }

    /// Sum of one department's row.
    #[must_use]
    pub fn department_total(&self, name: &str) -> Option<Decimal> {
        self.department(name).map(|row| row.iter().copied().sum())
    }

    /// Sum of every department for each quarter.
    #[must_use]
    pub fn quarter_totals(&self) -> Vec<Decimal> {
        (0..self.quarters.len())
            .map(|i| self.departments.values().map(|row| row[i]).sum())
            .collect()
    }

    /// Sum of every cell.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.departments.values().flatten().copied().sum()
    }

    /// Splits the matrix into its labels and rows.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, BTreeMap<String, Vec<Decimal>>) {
        (self.quarters, self.departments)
    }
}
