//! Per-department salary totals for one window.

use std::collections::{BTreeMap, HashMap};

use payspan_shared::RoundingStage;
use payspan_shared::types::{DepartmentId, EmployeeId};
use rust_decimal::Decimal;

use super::apportion::{IntervalApportioner, per_year, salary_days};
use super::types::{AssignmentInterval, Department, DepartmentTotals, SalaryInterval};
use crate::calendar::DateWindow;

/// Name recorded for assignments whose department is not in the department list.
pub const UNRESOLVED_DEPARTMENT: &str = "???";

/// Salary history per employee, each list ordered by `from_date`.
pub type SalariesByEmployee = HashMap<EmployeeId, Vec<SalaryInterval>>;

/// Assignments per department, each list ordered by employee then `from_date`.
pub type AssignmentsByDepartment = BTreeMap<DepartmentId, Vec<AssignmentInterval>>;

/// Department display names by code.
pub type DepartmentNames = HashMap<DepartmentId, String>;

/// Groups salary intervals by employee.
#[must_use]
pub fn group_salaries_by_employee(
    salaries: impl IntoIterator<Item = SalaryInterval>,
) -> SalariesByEmployee {
    let mut map = SalariesByEmployee::new();
    for salary in salaries {
        map.entry(salary.employee_id).or_default().push(salary);
    }
    for list in map.values_mut() {
        list.sort_by_key(|s| s.from_date);
    }
    map
}

/// Groups assignment intervals by department.
#[must_use]
pub fn group_assignments_by_department<'a>(
    assignments: impl IntoIterator<Item = &'a AssignmentInterval>,
) -> AssignmentsByDepartment {
    let mut map = AssignmentsByDepartment::new();
    for assignment in assignments {
        map.entry(assignment.department_id.clone())
            .or_default()
            .push(assignment.clone());
    }
    for list in map.values_mut() {
        list.sort_by_key(|a| (a.employee_id, a.from_date));
    }
    map
}

/// Builds the code-to-name lookup for a department list.
#[must_use]
pub fn department_names(departments: &[Department]) -> DepartmentNames {
    departments
        .iter()
        .map(|d| (d.id.clone(), d.name.clone()))
        .collect()
}

/// Sums apportioned salaries per department within a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentAggregator {
    apportioner: IntervalApportioner,
}

impl DepartmentAggregator {
    /// Creates an aggregator around an apportioner.
    #[must_use]
    pub const fn new(apportioner: IntervalApportioner) -> Self {
        Self { apportioner }
    }

    /// Totals per department name for `window`.
    ///
    /// Only assignments overlapping the window count, and each one is clipped
    /// to the window before its employee's salaries are apportioned. Departments
    /// without a qualifying assignment are absent from the result.
    #[must_use]
    pub fn aggregate(
        &self,
        window: &DateWindow,
        assignments: &[AssignmentInterval],
        salaries: &SalariesByEmployee,
        names: &DepartmentNames,
    ) -> DepartmentTotals {
        let mut totals = DepartmentTotals::new();
        let qualifying = assignments
            .iter()
            .filter(|a| window.overlaps(a.from_date, a.to_date));

        for (department_id, members) in group_assignments_by_department(qualifying) {
            let name = names.get(&department_id).map_or_else(
                || {
                    tracing::warn!(department = %department_id, "Unresolved department id");
                    UNRESOLVED_DEPARTMENT.to_string()
                },
                Clone::clone,
            );

            let tenures = members.iter().filter_map(|assignment| {
                let tenure = window.clip(assignment.from_date, assignment.to_date)?;
                let employee_salaries = salaries
                    .get(&assignment.employee_id)
                    .map_or(&[][..], Vec::as_slice);
                Some((tenure, employee_salaries))
            });

            // Final-total rounding sums exact salary-days and divides once per department.
            let department_total: Decimal = match self.apportioner.rounding().stage {
                RoundingStage::PerApportionment => tenures
                    .map(|(tenure, s)| {
                        self.apportioner
                            .apportion(tenure.from_date(), tenure.to_date(), s)
                    })
                    .sum(),
                RoundingStage::FinalTotal => per_year(
                    tenures
                        .map(|(tenure, s)| salary_days(tenure.from_date(), tenure.to_date(), s))
                        .sum(),
                ),
            };

            *totals.entry(name).or_insert(Decimal::ZERO) += department_total;
        }

        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::payroll::types::open_ended;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assignment(emp: i64, dept: &str, from: NaiveDate, to: NaiveDate) -> AssignmentInterval {
        AssignmentInterval::new(EmployeeId::new(emp), DepartmentId::new(dept), from, to).unwrap()
    }

    fn salary(emp: i64, amount: i64, from: NaiveDate, to: NaiveDate) -> SalaryInterval {
        SalaryInterval::new(EmployeeId::new(emp), amount, from, to).unwrap()
    }

    fn names() -> DepartmentNames {
        department_names(&[Department::new("1", "old dept"), Department::new("2", "new dept")])
    }

    #[test]
    fn test_group_salaries_sorted_by_from_date() {
        let grouped = group_salaries_by_employee([
            salary(2, 70_000, date(1997, 6, 22), open_ended()),
            salary(1, 50_000, date(1996, 4, 2), open_ended()),
            salary(2, 60_000, date(1996, 4, 2), date(1997, 6, 22)),
        ]);

        assert_eq!(grouped.len(), 2);
        let emp2 = &grouped[&EmployeeId::new(2)];
        assert_eq!(emp2[0].amount, 60_000);
        assert_eq!(emp2[1].amount, 70_000);
    }

    #[test]
    fn test_assignment_clipped_to_window() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1997, 1, 1), date(1998, 1, 1)).unwrap();
        // Salary of 36,500 for 10 days inside the window.
        let salaries = group_salaries_by_employee([salary(1, 36_500, date(1990, 1, 1), open_ended())]);
        let assignments = [assignment(1, "1", date(1990, 1, 1), date(1997, 1, 11))];

        let totals = aggregator.aggregate(&window, &assignments, &salaries, &names());
        assert_eq!(totals["old dept"], dec!(1000));
    }

    #[test]
    fn test_transfer_mid_window_splits_salary() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1997, 6, 1), date(1997, 7, 1)).unwrap();
        let salaries = group_salaries_by_employee([salary(2, 36_500, date(1996, 4, 2), open_ended())]);
        let assignments = [
            assignment(2, "1", date(1996, 4, 2), date(1997, 6, 22)),
            assignment(2, "2", date(1997, 6, 22), open_ended()),
        ];

        let totals = aggregator.aggregate(&window, &assignments, &salaries, &names());
        assert_eq!(totals["old dept"], dec!(2100));
        assert_eq!(totals["new dept"], dec!(900));
    }

    #[test]
    fn test_assignment_ending_at_window_start_excluded() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1997, 7, 1), date(1997, 10, 1)).unwrap();
        let salaries = group_salaries_by_employee([salary(2, 60_000, date(1996, 4, 2), open_ended())]);
        let assignments = [assignment(2, "1", date(1996, 4, 2), date(1997, 7, 1))];

        let totals = aggregator.aggregate(&window, &assignments, &salaries, &names());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_assignment_starting_at_window_end_excluded() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1997, 4, 1), date(1997, 7, 1)).unwrap();
        let salaries = group_salaries_by_employee([salary(2, 60_000, date(1996, 4, 2), open_ended())]);
        let assignments = [assignment(2, "2", date(1997, 7, 1), open_ended())];

        let totals = aggregator.aggregate(&window, &assignments, &salaries, &names());
        assert!(!totals.contains_key("new dept"));
    }

    #[test]
    fn test_unresolved_department_uses_placeholder() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1997, 1, 1), date(1998, 1, 1)).unwrap();
        let salaries = group_salaries_by_employee([salary(1, 36_500, date(1990, 1, 1), open_ended())]);
        let assignments = [assignment(1, "d999", date(1990, 1, 1), open_ended())];

        let totals = aggregator.aggregate(&window, &assignments, &salaries, &names());
        assert_eq!(totals[UNRESOLVED_DEPARTMENT], dec!(36500));
    }

    #[test]
    fn test_employee_without_salary_contributes_zero() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1997, 1, 1), date(1998, 1, 1)).unwrap();
        let assignments = [assignment(9, "1", date(1990, 1, 1), open_ended())];

        let totals =
            aggregator.aggregate(&window, &assignments, &SalariesByEmployee::new(), &names());
        assert_eq!(totals["old dept"], Decimal::ZERO);
    }

    #[test]
    fn test_department_total_divides_once() {
        let aggregator = DepartmentAggregator::default();
        let window = DateWindow::new(date(1996, 4, 1), date(1996, 7, 1)).unwrap();
        let salaries = group_salaries_by_employee([
            salary(1, 50_000, date(1996, 4, 2), open_ended()),
            salary(2, 60_000, date(1996, 4, 2), open_ended()),
        ]);
        let assignments = [
            assignment(1, "1", date(1996, 4, 2), open_ended()),
            assignment(2, "1", date(1996, 4, 2), open_ended()),
        ];

        let totals = aggregator.aggregate(&window, &assignments, &salaries, &names());
        assert_eq!(totals["old dept"], dec!(9900000) / dec!(365));
    }
}
