//! Database seeder for Payspan development and testing.
//!
//! Seeds two departments and two employees: one on a flat salary in
//! "old dept", one who moves to "new dept" on 1997-06-22 and gets a raise
//! on 1998-05-06. Rows that already exist are left alone.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use payspan_db::entities::{departments, dept_emp, salaries};
use payspan_shared::AppConfig;

/// Far-future end date of open-ended rows.
const OPEN_ENDED: (i32, u32, u32) = (9999, 1, 1);

const DEPARTMENTS: [(&str, &str); 2] = [("1", "old dept"), ("2", "new dept")];

const SALARIES: [(i32, i32, (i32, u32, u32), (i32, u32, u32)); 3] = [
    (1, 50_000, (1996, 4, 2), OPEN_ENDED),
    (2, 60_000, (1996, 4, 2), (1998, 5, 6)),
    (2, 70_000, (1998, 5, 6), OPEN_ENDED),
];

const ASSIGNMENTS: [(i32, &str, (i32, u32, u32), (i32, u32, u32)); 3] = [
    (1, "1", (1996, 4, 2), OPEN_ENDED),
    (2, "1", (1996, 4, 2), (1997, 6, 22)),
    (2, "2", (1997, 6, 22), OPEN_ENDED),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = payspan_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding departments...");
    seed_departments(&db).await?;

    println!("Seeding salaries...");
    seed_salaries(&db).await?;

    println!("Seeding department assignments...");
    seed_assignments(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

fn date((y, m, d): (i32, u32, u32)) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("Invalid date {y}-{m}-{d}"))
}

async fn seed_departments(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (dept_no, dept_name) in DEPARTMENTS {
        if departments::Entity::find_by_id(dept_no.to_string())
            .one(db)
            .await?
            .is_some()
        {
            println!("  Department {dept_no} already exists, skipping...");
            continue;
        }

        departments::ActiveModel {
            dept_no: Set(dept_no.to_string()),
            dept_name: Set(dept_name.to_string()),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert department {dept_no}"))?;
        println!("  Created department {dept_no}: {dept_name}");
    }
    Ok(())
}

async fn seed_salaries(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (emp_no, salary, from, to) in SALARIES {
        let from_date = date(from)?;
        if salaries::Entity::find_by_id((emp_no, from_date))
            .one(db)
            .await?
            .is_some()
        {
            println!("  Salary for employee {emp_no} from {from_date} already exists, skipping...");
            continue;
        }

        salaries::ActiveModel {
            emp_no: Set(emp_no),
            salary: Set(salary),
            from_date: Set(from_date),
            to_date: Set(date(to)?),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert salary for employee {emp_no}"))?;
        println!("  Created salary {salary} for employee {emp_no} from {from_date}");
    }
    Ok(())
}

async fn seed_assignments(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (emp_no, dept_no, from, to) in ASSIGNMENTS {
        if dept_emp::Entity::find_by_id((emp_no, dept_no.to_string()))
            .one(db)
            .await?
            .is_some()
        {
            println!("  Employee {emp_no} in department {dept_no} already exists, skipping...");
            continue;
        }

        dept_emp::ActiveModel {
            emp_no: Set(emp_no),
            dept_no: Set(dept_no.to_string()),
            from_date: Set(date(from)?),
            to_date: Set(date(to)?),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert assignment for employee {emp_no}"))?;
        println!("  Assigned employee {emp_no} to department {dept_no}");
    }
    Ok(())
}
