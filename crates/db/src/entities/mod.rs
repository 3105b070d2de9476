//! `SeaORM` entities for the payroll tables.

pub mod departments;
pub mod dept_emp;
pub mod salaries;

pub mod prelude {
    //! Entity re-exports.
    pub use super::departments::Entity as Departments;
    pub use super::dept_emp::Entity as DeptEmp;
    pub use super::salaries::Entity as Salaries;
}
