//! Payspan report command.
//!
//! Loads configuration, reads one consistent payroll snapshot from the
//! database, and prints quarterly salary totals per department.
//!
//! Usage:
//!   payspan --year 1997 --quarters 8
//!   payspan --start 1996-05-17 --format json
//!   payspan --range

mod cli;
mod render;

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Args, OutputFormat};
use payspan_core::ReportBuilder;
use payspan_db::{PayrollRepository, connect_with};
use payspan_shared::{AppConfig, AppError};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payspan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            tracing::error!(error = %err, code, "Report failed");
            eprintln!("error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let db = connect_with(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Connected to database");
    let repo = PayrollRepository::new(db);

    if args.range {
        let Some((earliest, latest)) = repo.assignment_date_range().await.map_err(AppError::from)?
        else {
            return Err(AppError::NoData("No department assignments found".to_string()).into());
        };
        println!("Assignments start between {earliest} and {latest}");
        return Ok(());
    }

    let report_config = args.report_config(config.report);
    let quarters = args.quarter_count(report_config.default_quarters);
    let start = args.start_date();

    let snapshot = repo
        .load_snapshot(start, quarters)
        .await
        .map_err(AppError::from)?;

    let builder = ReportBuilder::new(report_config);
    let report = if args.parallel {
        builder.build_report_parallel(&snapshot, start, Some(quarters))
    } else {
        builder.build_report(&snapshot, start, Some(quarters))
    }
    .map_err(AppError::from)?;

    info!(
        quarters = report.quarters().len(),
        departments = report.departments().len(),
        "Report built"
    );

    let output = match args.format {
        OutputFormat::Table => render::table(&report),
        OutputFormat::Json => render::json(&report).context("Failed to serialize report")?,
    };
    print!("{output}");
    if args.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
