//! Interactive menu shown when the CLI is run without a subcommand.
//!
//! Walks the user through the same choices the flags expose: pick an
//! action, point at a school profile and roster, answer the two filter
//! questions.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};
use student_map_analytics::compute;
use student_map_analytics_models::AggregateOptions;
use student_map_roster::registry::resolve_school;
use student_map_roster::{StudentRecord, load_valid_roster};
use student_map_roster_models::school::SchoolProfile;

/// Top-level action selection for the student map toolchain.
enum Action {
    Report,
    Export,
    Serve,
}

impl Action {
    const ALL: &[Self] = &[Self::Report, Self::Export, Self::Serve];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Report => "Print area report",
            Self::Export => "Export frontend artifacts",
            Self::Serve => "Start server",
        }
    }
}

/// Runs the interactive menu, prompting the user to select and configure
/// an action.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected action fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Student Map Toolchain");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Report => report(),
        Action::Export => export(),
        Action::Serve => {
            actix_web::rt::System::new().block_on(student_map_server::interactive::run())?;
            Ok(())
        }
    }
}

fn prompt_inputs() -> Result<(SchoolProfile, Vec<StudentRecord>), Box<dyn std::error::Error>> {
    let school_path: String = Input::new()
        .with_prompt("School profile TOML (blank for the built-in default)")
        .allow_empty(true)
        .interact_text()?;
    let school_path = (!school_path.is_empty()).then(|| PathBuf::from(school_path));

    let school = resolve_school(school_path.as_deref())?;

    let roster_path: String = Input::new()
        .with_prompt("Roster CSV")
        .default(school.roster_path.clone())
        .interact_text()?;
    let records = load_valid_roster(Path::new(&roster_path))?;

    println!("Loaded {} students for {}", records.len(), school.name);

    Ok((school, records))
}

fn prompt_options(school: &SchoolProfile) -> Result<AggregateOptions, Box<dyn std::error::Error>> {
    let exclude_small = Confirm::new()
        .with_prompt("Exclude areas with fewer than 10 students?")
        .default(school.filters.exclude_small)
        .interact()?;
    let only_top20 = Confirm::new()
        .with_prompt("Keep only the top 20 areas?")
        .default(school.filters.only_top20)
        .interact()?;

    Ok(AggregateOptions::new(school.latitude, school.longitude)
        .with_toggles(exclude_small, only_top20))
}

fn report() -> Result<(), Box<dyn std::error::Error>> {
    let (school, records) = prompt_inputs()?;
    let options = prompt_options(&school)?;

    let rows = compute(&records, options);
    crate::print_table(&school, &rows);

    Ok(())
}

fn export() -> Result<(), Box<dyn std::error::Error>> {
    let (school, records) = prompt_inputs()?;
    let options = prompt_options(&school)?;

    let dir: String = Input::new()
        .with_prompt("Output directory")
        .default(student_map_generate::output_dir().display().to_string())
        .interact_text()?;

    let rows = compute(&records, options);
    student_map_generate::write_artifacts(Path::new(&dir), &school, options, &rows)?;

    Ok(())
}
