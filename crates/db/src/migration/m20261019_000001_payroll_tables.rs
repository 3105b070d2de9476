//! Initial database migration.
//!
//! Creates the department, salary history, and department assignment tables
//! together with the indexes used by the range queries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(DEPARTMENTS_SQL).await?;
        db.execute_unprepared(SALARIES_SQL).await?;
        db.execute_unprepared(DEPT_EMP_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const DEPARTMENTS_SQL: &str = r"
CREATE TABLE departments (
    dept_no VARCHAR(4) PRIMARY KEY,
    dept_name VARCHAR(40) NOT NULL UNIQUE
);
";

// to_date is exclusive; open-ended rows carry 9999-01-01.
const SALARIES_SQL: &str = r"
CREATE TABLE salaries (
    emp_no INTEGER NOT NULL,
    salary INTEGER NOT NULL CHECK (salary >= 0),
    from_date DATE NOT NULL,
    to_date DATE NOT NULL,
    PRIMARY KEY (emp_no, from_date),
    CONSTRAINT chk_salaries_range CHECK (from_date < to_date)
);

CREATE INDEX idx_salaries_range ON salaries(to_date, from_date);
";

const DEPT_EMP_SQL: &str = r"
CREATE TABLE dept_emp (
    emp_no INTEGER NOT NULL,
    dept_no VARCHAR(4) NOT NULL REFERENCES departments(dept_no) ON DELETE CASCADE,
    from_date DATE NOT NULL,
    to_date DATE NOT NULL,
    PRIMARY KEY (emp_no, dept_no),
    CONSTRAINT chk_dept_emp_range CHECK (from_date < to_date)
);

CREATE INDEX idx_dept_emp_dept_no ON dept_emp(dept_no);
CREATE INDEX idx_dept_emp_range ON dept_emp(to_date, from_date);
CREATE INDEX idx_dept_emp_from_date ON dept_emp(from_date);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS dept_emp CASCADE;
DROP TABLE IF EXISTS salaries CASCADE;
DROP TABLE IF EXISTS departments CASCADE;
";
