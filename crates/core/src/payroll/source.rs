//! Read access to departments and interval history.

use chrono::NaiveDate;

use super::types::{AssignmentInterval, Department, SalaryInterval};

/// Read operations the report needs from the data store.
///
/// Range queries return every interval overlapping `[from, to)`, i.e. with
/// `to_date > from AND from_date < to`.
pub trait PayrollSource {
    /// All departments.
    fn list_departments(&self) -> Vec<Department>;

    /// Salary intervals overlapping `[from, to)`.
    fn fetch_salary_intervals(&self, from: NaiveDate, to: NaiveDate) -> Vec<SalaryInterval>;

    /// Assignment intervals overlapping `[from, to)`.
    fn fetch_assignment_intervals(&self, from: NaiveDate, to: NaiveDate)
    -> Vec<AssignmentInterval>;

    /// Earliest assignment start in the whole dataset, or `None` when there are no assignments.
    fn earliest_assignment_start(&self) -> Option<NaiveDate>;
}

/// An in-memory, read-only copy of the data a report reads.
#[derive(Debug, Clone, Default)]
pub struct PayrollSnapshot {
    departments: Vec<Department>,
    salaries: Vec<SalaryInterval>,
    assignments: Vec<AssignmentInterval>,
    earliest_assignment_start: Option<NaiveDate>,
}

impl PayrollSnapshot {
    /// Creates a snapshot; the earliest assignment start is taken from `assignments`.
    #[must_use]
    pub fn new(
        departments: Vec<Department>,
        salaries: Vec<SalaryInterval>,
        assignments: Vec<AssignmentInterval>,
    ) -> Self {
        let earliest_assignment_start = assignments.iter().map(|a| a.from_date).min();
        Self {
            departments,
            salaries,
            assignments,
            earliest_assignment_start,
        }
    }

    /// Overrides the earliest assignment start.
    ///
    /// Used when the snapshot only holds the intervals of one report span while
    /// the dataset reaches further back.
    #[must_use]
    pub fn with_earliest_assignment_start(mut self, earliest: Option<NaiveDate>) -> Self {
        self.earliest_assignment_start = earliest;
        self
    }

    /// Number of salary intervals held.
    #[must_use]
    pub fn salary_count(&self) -> usize {
        self.salaries.len()
    }

    /// Number of assignment intervals held.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

impl PayrollSource for PayrollSnapshot {
    fn list_departments(&self) -> Vec<Department> {
        self.departments.clone()
    }

    fn fetch_salary_intervals(&self, from: NaiveDate, to: NaiveDate) -> Vec<SalaryInterval> {
        self.salaries
            .iter()
            .filter(|s| s.overlaps(from, to))
            .cloned()
            .collect()
    }

    fn fetch_assignment_intervals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<AssignmentInterval> {
        self.assignments
            .iter()
            .filter(|a| a.overlaps(from, to))
            .cloned()
            .collect()
    }

    fn earliest_assignment_start(&self) -> Option<NaiveDate> {
        self.earliest_assignment_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payspan_shared::types::{DepartmentId, EmployeeId};

    use crate::payroll::types::open_ended;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> PayrollSnapshot {
        let emp = EmployeeId::new(2);
        PayrollSnapshot::new(
            vec![Department::new("1", "old dept"), Department::new("2", "new dept")],
            vec![
                SalaryInterval::new(emp, 60_000, date(1996, 4, 2), date(1997, 6, 22)).unwrap(),
                SalaryInterval::new(emp, 70_000, date(1997, 6, 22), open_ended()).unwrap(),
            ],
            vec![
                AssignmentInterval::new(emp, DepartmentId::new("2"), date(1997, 6, 22), open_ended())
                    .unwrap(),
                AssignmentInterval::new(emp, DepartmentId::new("1"), date(1996, 4, 2), date(1997, 6, 22))
                    .unwrap(),
            ],
        )
    }

    #[test]
    fn test_all_intervals_in_wide_range() {
        let source = snapshot();
        assert_eq!(
            source.fetch_assignment_intervals(date(1995, 2, 1), open_ended()).len(),
            2
        );
        assert_eq!(source.fetch_salary_intervals(date(1995, 2, 1), open_ended()).len(), 2);
    }

    #[test]
    fn test_range_ending_at_boundary_is_exclusive() {
        let source = snapshot();
        let found = source.fetch_assignment_intervals(date(1995, 2, 1), date(1997, 6, 22));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].department_id, DepartmentId::new("1"));

        let salaries = source.fetch_salary_intervals(date(1997, 6, 22), date(1997, 7, 1));
        assert_eq!(salaries.len(), 1);
        assert_eq!(salaries[0].amount, 70_000);
    }

    #[test]
    fn test_earliest_assignment_start() {
        let source = snapshot();
        assert_eq!(source.earliest_assignment_start(), Some(date(1996, 4, 2)));

        let overridden = source.with_earliest_assignment_start(Some(date(1990, 1, 1)));
        assert_eq!(overridden.earliest_assignment_start(), Some(date(1990, 1, 1)));
        assert_eq!(PayrollSnapshot::default().earliest_assignment_start(), None);
    }

    #[test]
    fn test_counts() {
        let source = snapshot();
        assert_eq!(source.salary_count(), 2);
        assert_eq!(source.assignment_count(), 2);
        assert_eq!(source.list_departments().len(), 2);
    }
}
