//! Report rendering.

use comfy_table::{Cell, CellAlignment, Table};
use payspan_core::ReportMatrix;
use rust_decimal::Decimal;

/// Renders the report as a text table with a total column and a total row.
pub fn table(report: &ReportMatrix) -> String {
    let mut table = Table::new();

    let mut header = vec![Cell::new("Department")];
    header.extend(report.quarters().iter().map(Cell::new));
    header.push(Cell::new("Total"));
    table.set_header(header);

    for (name, amounts) in report.departments() {
        let mut row = vec![Cell::new(name)];
        row.extend(amounts.iter().map(amount_cell));
        row.push(amount_cell(&amounts.iter().sum()));
        table.add_row(row);
    }

    let mut footer = vec![Cell::new("Total")];
    footer.extend(report.quarter_totals().iter().map(amount_cell));
    footer.push(amount_cell(&report.grand_total()));
    table.add_row(footer);

    table.to_string()
}

/// Renders the report as pretty-printed JSON.
pub fn json(report: &ReportMatrix) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn amount_cell(amount: &Decimal) -> Cell {
    Cell::new(format!("{:.2}", amount.round_dp(2))).set_alignment(CellAlignment::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use payspan_core::ReportBuilder;
    use payspan_core::payroll::{
        AssignmentInterval, Department, PayrollSnapshot, SalaryInterval, open_ended,
    };
    use payspan_shared::types::{DepartmentId, EmployeeId};
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 36,500 a year is exactly 100 a day.
    fn report() -> ReportMatrix {
        let emp = EmployeeId::new(1);
        let snapshot = PayrollSnapshot::new(
            vec![Department::new("1", "old dept"), Department::new("2", "new dept")],
            vec![SalaryInterval::new(emp, 36_500, date(1990, 1, 1), open_ended()).unwrap()],
            vec![
                AssignmentInterval::new(emp, DepartmentId::new("1"), date(1990, 1, 1), open_ended())
                    .unwrap(),
            ],
        );
        ReportBuilder::default()
            .build_report(&snapshot, Some(date(1997, 1, 1)), Some(2))
            .unwrap()
    }

    #[test]
    fn test_table_layout() {
        let rendered = table(&report());
        let lines: Vec<&str> = rendered.lines().collect();
        let find = |prefix: &str| {
            lines
                .iter()
                .rposition(|line| line.starts_with(prefix))
                .unwrap_or_else(|| panic!("no line starting with {prefix:?}"))
        };

        let header = find("| Department");
        let new_dept = find("| new dept");
        let old_dept = find("| old dept");
        let total = find("| Total");

        assert!(lines[header].contains("1997 Q1"));
        assert!(lines[header].contains("1997 Q2"));
        // Rows follow department name order, with the total row last.
        assert!(header < new_dept && new_dept < old_dept && old_dept < total);

        assert!(lines[old_dept].contains("9000.00"));
        assert!(lines[old_dept].contains("9100.00"));
        assert!(lines[old_dept].contains("18100.00"));
        assert!(lines[total].contains("18100.00"));
        // Amounts are right-aligned under the wider quarter labels.
        assert!(lines[new_dept].contains("    0.00 |"));
    }

    #[test]
    fn test_json_shape() {
        let rendered = json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["quarters"][0], "1997 Q1");
        let first = value["departments"]["old dept"][0].as_str().unwrap();
        assert_eq!(Decimal::from_str(first).unwrap(), Decimal::from(9000));
        assert_eq!(value["departments"]["new dept"].as_array().unwrap().len(), 2);
    }
}
