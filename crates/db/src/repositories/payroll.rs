//! Payroll repository: departments, salary history, and department assignments.
//!
//! Every range query uses half-open overlap against `[from, to)`:
//! `to_date > from AND from_date < to`.

use chrono::NaiveDate;
use payspan_core::ReportError;
use payspan_core::calendar::{generate_windows, span_of, validate_date_range};
use payspan_core::payroll::{AssignmentInterval, Department, PayrollSnapshot, SalaryInterval};
use payspan_shared::AppError;
use payspan_shared::types::{DepartmentId, EmployeeId};
use sea_orm::{
    AccessMode, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{departments, dept_emp, salaries};

/// Error types for payroll repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The requested range is empty or inverted.
    #[error(transparent)]
    Range(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Range(e) => e.into(),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Read access to the payroll tables.
#[derive(Debug)]
pub struct PayrollRepository {
    db: DatabaseConnection,
}

impl PayrollRepository {
    /// Creates a new payroll repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all departments ordered by code.
    pub async fn list_departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(departments_in(&self.db).await?)
    }

    /// Salary intervals overlapping `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns `Range` when `from >= to`, or a database error.
    pub async fn fetch_salary_intervals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalaryInterval>, RepositoryError> {
        validate_date_range(from, to)?;
        Ok(salaries_in(&self.db, from, to).await?)
    }

    /// Assignment intervals overlapping `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns `Range` when `from >= to`, or a database error.
    pub async fn fetch_assignment_intervals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AssignmentInterval>, RepositoryError> {
        validate_date_range(from, to)?;
        Ok(assignments_in(&self.db, from, to).await?)
    }

    /// Earliest assignment start, or `None` when there are no assignments.
    pub async fn earliest_assignment_start(&self) -> Result<Option<NaiveDate>, RepositoryError> {
        Ok(earliest_assignment_in(&self.db).await?)
    }

    /// Earliest and latest assignment start dates.
    ///
    /// The upper bound is the latest `from_date`, never a `to_date`, so the
    /// open-ended sentinel does not stretch the range.
    pub async fn assignment_date_range(
        &self,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, RepositoryError> {
        let Some(earliest) = earliest_assignment_in(&self.db).await? else {
            return Ok(None);
        };
        let latest = dept_emp::Entity::find()
            .order_by_desc(dept_emp::Column::FromDate)
            .one(&self.db)
            .await?
            .map_or(earliest, |row| row.from_date);

        Ok(Some((earliest, latest)))
    }

    /// Loads everything a report over `quarters` quarters from `start` reads.
    ///
    /// All reads run in one read-only, repeatable-read transaction, so the
    /// snapshot is consistent. The transaction is committed on success and
    /// rolled back when dropped on any error path.
    pub async fn load_snapshot(
        &self,
        start: Option<NaiveDate>,
        quarters: u32,
    ) -> Result<PayrollSnapshot, RepositoryError> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let earliest = earliest_assignment_in(&txn).await?;
        let departments = departments_in(&txn).await?;

        let span = start
            .or(earliest)
            .and_then(|start| span_of(&generate_windows(start, quarters)));
        let (salaries, assignments) = match span {
            Some(span) => (
                salaries_in(&txn, span.from_date(), span.to_date()).await?,
                assignments_in(&txn, span.from_date(), span.to_date()).await?,
            ),
            None => (Vec::new(), Vec::new()),
        };

        txn.commit().await?;

        tracing::debug!(
            span = ?span,
            departments = departments.len(),
            salaries = salaries.len(),
            assignments = assignments.len(),
            "Loaded payroll snapshot"
        );

        Ok(PayrollSnapshot::new(departments, salaries, assignments)
            .with_earliest_assignment_start(earliest))
    }
}

async fn departments_in<C: ConnectionTrait>(conn: &C) -> Result<Vec<Department>, DbErr> {
    let rows = departments::Entity::find()
        .order_by_asc(departments::Column::DeptNo)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| Department::new(row.dept_no, row.dept_name))
        .collect())
}

async fn salaries_in<C: ConnectionTrait>(
    conn: &C,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<SalaryInterval>, DbErr> {
    let rows = salaries::Entity::find()
        .filter(salaries::Column::ToDate.gt(from))
        .filter(salaries::Column::FromDate.lt(to))
        .order_by_asc(salaries::Column::EmpNo)
        .order_by_asc(salaries::Column::FromDate)
        .all(conn)
        .await?;

    Ok(rows.into_iter().filter_map(salary_from_row).collect())
}

async fn assignments_in<C: ConnectionTrait>(
    conn: &C,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<AssignmentInterval>, DbErr> {
    let rows = dept_emp::Entity::find()
        .filter(dept_emp::Column::ToDate.gt(from))
        .filter(dept_emp::Column::FromDate.lt(to))
        .order_by_asc(dept_emp::Column::EmpNo)
        .order_by_asc(dept_emp::Column::FromDate)
        .all(conn)
        .await?;

    Ok(rows.into_iter().filter_map(assignment_from_row).collect())
}

async fn earliest_assignment_in<C: ConnectionTrait>(conn: &C) -> Result<Option<NaiveDate>, DbErr> {
    Ok(dept_emp::Entity::find()
        .order_by_asc(dept_emp::Column::FromDate)
        .one(conn)
        .await?
        .map(|row| row.from_date))
}

// Rows with an empty or inverted range earn nothing; they are skipped with a warning.
fn salary_from_row(row: salaries::Model) -> Option<SalaryInterval> {
    SalaryInterval::new(
        EmployeeId::new(i64::from(row.emp_no)),
        i64::from(row.salary),
        row.from_date,
        row.to_date,
    )
    .inspect_err(|e| tracing::warn!(emp_no = row.emp_no, error = %e, "Skipping salary row"))
    .ok()
}

fn assignment_from_row(row: dept_emp::Model) -> Option<AssignmentInterval> {
    AssignmentInterval::new(
        EmployeeId::new(i64::from(row.emp_no)),
        DepartmentId::new(row.dept_no.as_str()),
        row.from_date,
        row.to_date,
    )
    .inspect_err(|e| {
        tracing::warn!(emp_no = row.emp_no, dept_no = %row.dept_no, error = %e, "Skipping assignment row");
    })
    .ok()
}

#[cfg(test)]
#[path = "payroll_tests.rs"]
mod tests;
