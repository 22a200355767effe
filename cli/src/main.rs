mod config;
mod dashboard;
mod tables;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use attendance_core::report::{monthly_report_filename, yearly_report_filename};
use attendance_core::seed::{generate_history, SeedOptions};
use attendance_core::{
    parse_day, serialize_monthly_report, serialize_yearly_report, AttendanceService, Employee, EmployeeId,
    FileAttendanceRepository, MarkStatus, YearMonth, YearlyMonthEntry,
};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use tracing::{info, Level};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "attendance")]
#[command(about = "Daily attendance register with monthly and yearly rollups", long_about = None)]
struct Cli {
    /// Directory holding register.json (defaults to ATTENDANCE_HOME or ~/.attendance)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage the employee roster
    Roster {
        #[command(subcommand)]
        action: RosterCommand,
    },
    /// Mark one employee present or absent
    Mark {
        employee_id: EmployeeId,
        status: MarkStatus,
        /// today, yesterday, -Nd or YYYY-MM-DD
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Mark the whole roster present or absent
    MarkAll {
        status: MarkStatus,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Show one employee's status for a day
    Status {
        employee_id: EmployeeId,
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Present / absent / not marked tally for a day
    Stats {
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Monthly summary per employee (YYYY-MM, defaults to the current month)
    Monthly {
        #[arg(long)]
        month: Option<YearMonth>,
    },
    /// Month-by-month percentages for a year
    Yearly {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Replace or clear the present-day count of a month
    Override {
        #[command(subcommand)]
        action: OverrideCommand,
    },
    /// Write a CSV report
    Export {
        #[command(subcommand)]
        target: ExportCommand,
    },
    /// Fill the register with sample history before today
    Seed {
        #[arg(long, default_value_t = 90)]
        days: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Open the terminal dashboard
    Dashboard,
}

#[derive(clap::Subcommand)]
enum RosterCommand {
    /// Replace the roster with a JSON array of employees
    Import { file: PathBuf },
    /// List the roster
    List,
}

#[derive(clap::Subcommand)]
enum OverrideCommand {
    Set {
        employee_id: EmployeeId,
        month: YearMonth,
        present_days: u32,
    },
    Clear {
        employee_id: EmployeeId,
        month: YearMonth,
    },
}

#[derive(clap::Subcommand)]
enum ExportCommand {
    Monthly {
        #[arg(long)]
        month: Option<YearMonth>,
        /// Output directory (defaults to ATTENDANCE_EXPORT_DIR or the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Yearly {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_roster_file(path: &Path) -> Result<Vec<Employee>> {
    let file = File::open(path).with_context(|| format!("Could not open roster file {}", path.display()))?;
    let employees: Vec<Employee> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Roster file {} is not a JSON array of employees", path.display()))?;
    Ok(employees)
}

fn write_report(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, content).with_context(|| format!("Could not write {}", path.display()))?;
    info!(path = %path.display(), "wrote report");
    Ok(path)
}

fn by_employee_id(rows: Vec<(&Employee, Vec<YearlyMonthEntry>)>) -> HashMap<EmployeeId, Vec<YearlyMonthEntry>> {
    rows.into_iter().map(|(e, entries)| (e.id, entries)).collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_flags(cli.data_dir.clone(), cli.verbose);

    // The dashboard owns the terminal; log lines would land on top of it.
    if !matches!(cli.command, Commands::Dashboard) {
        init_logging(config.log_level);
    }

    let repo = FileAttendanceRepository::new(&config.data_dir)?;
    let roster = repo.load_roster()?;
    let service = AttendanceService::new(repo, roster);

    let today = Local::now().date_naive();
    let day = |input: &str| -> Result<NaiveDate> { Ok(parse_day(input, today)?) };

    match cli.command {
        Commands::Roster { action } => match action {
            RosterCommand::Import { file } => {
                let employees = read_roster_file(&file)?;
                let count = employees.len();
                service.repository().replace_roster(employees)?;
                println!("Imported {} employees.", count);
            }
            RosterCommand::List => {
                if service.roster().is_empty() {
                    println!("Roster is empty. Import one with `attendance roster import <FILE>`.");
                } else {
                    println!("{}", tables::render_roster(service.roster()));
                }
            }
        },
        Commands::Mark { employee_id, status, date } => {
            let date = day(&date)?;
            service.mark_attendance(employee_id, status, date)?;
            println!("Marked employee {} {:?} on {}.", employee_id, status, date);
        }
        Commands::MarkAll { status, date } => {
            let date = day(&date)?;
            let count = service.mark_all(status, date)?;
            println!("Marked {} employees {:?} on {}.", count, status, date);
        }
        Commands::Status { employee_id, date } => {
            let date = day(&date)?;
            let status = service.get_status(employee_id, date)?;
            println!("{}: {}", date, status);
        }
        Commands::Stats { date } => {
            let date = day(&date)?;
            println!("{}", date.format("%A %Y-%m-%d"));
            println!("{}", tables::render_stats(&service.compute_daily_stats(date)?));
            let statuses = service.employee_day_statuses(date)?;
            if !statuses.is_empty() {
                println!("{}", tables::render_day(&statuses));
            }
        }
        Commands::Monthly { month } => {
            let year_month = month.unwrap_or_else(|| YearMonth::of(today));
            let rows = service.monthly_summaries(year_month)?;
            println!("{} ({} days)", year_month, year_month.days());
            println!("{}", tables::render_monthly(&rows));
            if rows.iter().any(|(_, s)| s.overridden) {
                println!("* manually overridden");
            }
        }
        Commands::Yearly { year } => {
            let year = year.unwrap_or_else(|| today.year());
            let summaries = by_employee_id(service.yearly_summaries(year)?);
            println!("{}", year);
            println!("{}", tables::render_yearly(service.roster(), &summaries));
        }
        Commands::Override { action } => match action {
            OverrideCommand::Set { employee_id, month, present_days } => {
                service.set_override(employee_id, month, present_days)?;
                println!("Employee {} now has {} present days in {}.", employee_id, present_days, month);
            }
            OverrideCommand::Clear { employee_id, month } => {
                if service.clear_override(employee_id, month)? {
                    println!("Override cleared for employee {} in {}.", employee_id, month);
                } else {
                    println!("No override for employee {} in {}.", employee_id, month);
                }
            }
        },
        Commands::Export { target } => {
            let path = match target {
                ExportCommand::Monthly { month, out } => {
                    let year_month = month.unwrap_or_else(|| YearMonth::of(today));
                    let rows = service.monthly_summaries(year_month)?;
                    let csv = serialize_monthly_report(&rows);
                    let dir = out.unwrap_or_else(|| config.export_dir.clone());
                    write_report(&dir, &monthly_report_filename(year_month), &csv)?
                }
                ExportCommand::Yearly { year, out } => {
                    let year = year.unwrap_or_else(|| today.year());
                    let summaries = by_employee_id(service.yearly_summaries(year)?);
                    let csv = serialize_yearly_report(service.roster(), &summaries);
                    let dir = out.unwrap_or_else(|| config.export_dir.clone());
                    write_report(&dir, &yearly_report_filename(year), &csv)?
                }
            };
            println!("Report written to {}", path.display());
        }
        Commands::Seed { days, seed } => {
            let options = SeedOptions { days, seed, ..SeedOptions::default() };
            let marks = generate_history(service.roster(), today, &options);
            let count = service.record_marks(marks)?;
            println!("Generated {} marks over the {} days before {}.", count, days, today);
        }
        Commands::Dashboard => {
            dashboard::run(service, today)?;
        }
    }
    Ok(())
}
