#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line entry point for the student map toolchain.
//!
//! `report` prints the ranked area summary to the terminal, `export`
//! writes the map and table artifacts the frontend consumes, and
//! `serve` starts the API server. Run with no arguments for an
//! interactive menu.

mod interactive;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use strum_macros::{Display, EnumString};
use student_map_analytics::compute;
use student_map_analytics_models::{AggregateOptions, AreaSummary};
use student_map_generate::{write_artifacts, write_summary_csv};
use student_map_roster::registry::resolve_school;
use student_map_roster::{StudentRecord, load_valid_roster};
use student_map_roster_models::school::SchoolProfile;

#[derive(Parser)]
#[command(name = "student_map_cli", about = "Student map toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ranked area summary
    Report {
        /// Output format: table, csv or json
        #[arg(long, default_value = "table")]
        format: String,
        #[command(flatten)]
        inputs: InputFlags,
        #[command(flatten)]
        filters: FilterFlags,
    },
    /// Write the map and table artifacts for the frontend
    Export {
        /// Output directory (workspace `data/generated` when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        inputs: InputFlags,
        #[command(flatten)]
        filters: FilterFlags,
    },
    /// Start the API server
    Serve {
        #[command(flatten)]
        inputs: InputFlags,
    },
}

/// Input overrides shared by every subcommand.
#[derive(Args)]
struct InputFlags {
    /// School profile TOML (built-in default when omitted)
    #[arg(long)]
    school: Option<PathBuf>,
    /// Roster CSV (the profile's roster path when omitted)
    #[arg(long)]
    roster: Option<PathBuf>,
}

/// Summary filter overrides shared by `report` and `export`.
#[derive(Args)]
struct FilterFlags {
    /// Drop areas with fewer than 10 students
    #[arg(long, conflicts_with = "include_small")]
    exclude_small: bool,
    /// Keep every area regardless of size
    #[arg(long)]
    include_small: bool,
    /// Keep only the 20 largest areas
    #[arg(long)]
    only_top20: bool,
    /// Explicit minimum student count (wins over the toggles)
    #[arg(long)]
    min_students: Option<u32>,
    /// Explicit rank cutoff (wins over the toggles)
    #[arg(long)]
    top_n: Option<u32>,
}

/// Output format for the `report` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum ReportFormat {
    Table,
    Csv,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run();
    };

    match command {
        Commands::Report {
            format,
            inputs,
            filters,
        } => {
            let format: ReportFormat = format
                .parse()
                .map_err(|_| format!("Unknown format: {format}"))?;
            run_report(&inputs, &filters, format)
        }
        Commands::Export {
            output,
            inputs,
            filters,
        } => run_export(output, &inputs, &filters),
        Commands::Serve { inputs } => run_serve(&inputs),
    }
}

/// Loads the school profile and its validated roster, honoring the
/// `--school` and `--roster` overrides.
fn load_inputs(
    inputs: &InputFlags,
) -> Result<(SchoolProfile, Vec<StudentRecord>), Box<dyn std::error::Error>> {
    let school = resolve_school(inputs.school.as_deref())?;
    let roster_path = inputs
        .roster
        .clone()
        .unwrap_or_else(|| PathBuf::from(&school.roster_path));
    let records = load_valid_roster(&roster_path)?;

    log::info!("Loaded {} students for {}", records.len(), school.name);

    Ok((school, records))
}

/// Builds the aggregation options from the profile defaults, the boolean
/// toggles and the explicit threshold flags, in that order.
fn resolve_options(school: &SchoolProfile, filters: &FilterFlags) -> AggregateOptions {
    let exclude_small = if filters.include_small {
        false
    } else {
        filters.exclude_small || school.filters.exclude_small
    };
    let only_top20 = filters.only_top20 || school.filters.only_top20;

    let mut options = AggregateOptions::new(school.latitude, school.longitude)
        .with_toggles(exclude_small, only_top20);
    if let Some(min_students) = filters.min_students {
        options = options.with_min_students(min_students);
    }
    if let Some(top_n) = filters.top_n {
        options = options.with_top_n(top_n);
    }

    options
}

fn run_report(
    inputs: &InputFlags,
    filters: &FilterFlags,
    format: ReportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (school, records) = load_inputs(inputs)?;
    let options = resolve_options(&school, filters);
    let rows = compute(&records, options);

    match format {
        ReportFormat::Table => print_table(&school, &rows),
        ReportFormat::Csv => write_summary_csv(std::io::stdout(), &rows)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(())
}

fn run_export(
    output: Option<PathBuf>,
    inputs: &InputFlags,
    filters: &FilterFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let (school, records) = load_inputs(inputs)?;
    let options = resolve_options(&school, filters);
    let rows = compute(&records, options);

    let dir = output.unwrap_or_else(student_map_generate::output_dir);
    write_artifacts(&dir, &school, options, &rows)?;

    Ok(())
}

fn run_serve(inputs: &InputFlags) -> Result<(), Box<dyn std::error::Error>> {
    // SAFETY: still single-threaded here; the server reads these once
    // during startup.
    unsafe {
        if let Some(school) = &inputs.school {
            std::env::set_var("SCHOOL_PROFILE", school);
        }
        if let Some(roster) = &inputs.roster {
            std::env::set_var("ROSTER_CSV", roster);
        }
    }

    actix_web::rt::System::new().block_on(student_map_server::run_server())?;

    Ok(())
}

/// Prints the ranked areas as a fixed-width terminal table.
pub(crate) fn print_table(school: &SchoolProfile, rows: &[AreaSummary]) {
    println!();
    println!("Ranked student areas for {}", school.name);
    println!();
    println!(
        "{:<5} {:<24} {:>8} {:>8} {:>8}",
        "RANK", "AREA", "STUDENTS", "PERCENT", "KM"
    );
    println!("{}", "-".repeat(57));

    for row in rows {
        println!(
            "{:<5} {:<24} {:>8} {:>8.2} {:>8.2}",
            row.rank, row.area, row.students, row.percent, row.distance_km
        );
    }

    let total: u32 = rows.iter().map(|row| row.students).sum();
    println!();
    println!("{} areas, {total} students", rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SchoolProfile {
        student_map_roster::registry::default_school()
    }

    fn flags() -> FilterFlags {
        FilterFlags {
            exclude_small: false,
            include_small: false,
            only_top20: false,
            min_students: None,
            top_n: None,
        }
    }

    #[test]
    fn report_formats_parse_from_lowercase_names() {
        assert_eq!("table".parse::<ReportFormat>(), Ok(ReportFormat::Table));
        assert_eq!("csv".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("yaml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn profile_defaults_drive_the_options() {
        let options = resolve_options(&profile(), &flags());

        assert_eq!(options.min_students, Some(10));
        assert_eq!(options.top_n, None);
    }

    #[test]
    fn include_small_overrides_the_profile_default() {
        let mut filters = flags();
        filters.include_small = true;

        let options = resolve_options(&profile(), &filters);

        assert_eq!(options.min_students, None);
    }

    #[test]
    fn explicit_thresholds_win_over_toggles() {
        let mut filters = flags();
        filters.only_top20 = true;
        filters.min_students = Some(5);
        filters.top_n = Some(3);

        let options = resolve_options(&profile(), &filters);

        assert_eq!(options.min_students, Some(5));
        assert_eq!(options.top_n, Some(3));
    }
}
