#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Roster ingestion.
//!
//! Reads the student roster CSV into [`StudentRecord`]s and drops the rows
//! that cannot take part in aggregation. A missing file or a malformed row
//! is fatal; a row that merely lacks a usable PIN code is not, it is
//! filtered out silently so one placeholder address never sinks the whole
//! report.

pub mod registry;

use std::path::Path;

pub use student_map_roster_models::StudentRecord;
pub use student_map_roster_models::school::{FilterDefaults, MapView, SchoolProfile};

/// Errors that can occur while loading roster or school profile inputs.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or row deserialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// School profile TOML was malformed.
    #[error("School profile error: {0}")]
    Profile(#[from] toml::de::Error),
}

/// Reads every roster row from a CSV stream.
///
/// The header row must carry the exact, case-sensitive column names
/// `Area`, `Latitude`, `Longitude` and `PIN_Code`; extra columns are
/// ignored. No validation happens here, placeholder rows come back too.
///
/// # Errors
///
/// Returns an error if the headers do not match or any row fails to
/// deserialize.
pub fn read_roster<R: std::io::Read>(reader: R) -> Result<Vec<StudentRecord>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: StudentRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// Reads every roster row from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_roster(path: &Path) -> Result<Vec<StudentRecord>, RosterError> {
    let file = std::fs::File::open(path)?;
    let records = read_roster(file)?;

    log::debug!("Read {} roster rows from {}", records.len(), path.display());

    Ok(records)
}

/// Drops rows with a non-positive PIN code.
///
/// These are placeholder addresses, not user errors, so they are excluded
/// without failing the run.
#[must_use]
pub fn valid_records(records: Vec<StudentRecord>) -> Vec<StudentRecord> {
    let before = records.len();
    let valid: Vec<StudentRecord> = records
        .into_iter()
        .filter(StudentRecord::is_valid)
        .collect();

    let dropped = before - valid.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} roster rows with non-positive PIN codes");
    }

    valid
}

/// Loads the roster at `path` and keeps only the rows that should take
/// part in aggregation.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_valid_roster(path: &Path) -> Result<Vec<StudentRecord>, RosterError> {
    Ok(valid_records(load_roster(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER_CSV: &str = "\
Area,Latitude,Longitude,PIN_Code
Shyamnagar,22.8295,88.3717,743127
Shyamnagar,22.8295,88.3717,743127
Ichapur,22.8063,88.3671,743144
Unknown,22.0,88.0,0
Unknown,22.0,88.0,-1
";

    #[test]
    fn reads_all_rows_including_placeholders() {
        let records = read_roster(ROSTER_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].area, "Shyamnagar");
        assert!((records[0].latitude - 22.8295).abs() < 1e-9);
        assert!((records[0].longitude - 88.3717).abs() < 1e-9);
        assert_eq!(records[0].pin_code, 743_127);
    }

    #[test]
    fn valid_records_drops_non_positive_pin_codes() {
        let records = read_roster(ROSTER_CSV.as_bytes()).unwrap();

        let valid = valid_records(records);

        assert_eq!(valid.len(), 3);
        assert!(valid.iter().all(StudentRecord::is_valid));
    }

    #[test]
    fn headers_are_case_sensitive() {
        let csv = "\
area,latitude,longitude,pin_code
Shyamnagar,22.8295,88.3717,743127
";

        assert!(read_roster(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "\
Area,Latitude,Longitude
Shyamnagar,22.8295,88.3717
";

        assert!(read_roster(csv.as_bytes()).is_err());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
Area,Latitude,Longitude,PIN_Code,Class
Shyamnagar,22.8295,88.3717,743127,VI
";

        let records = read_roster(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn malformed_coordinate_is_an_error() {
        let csv = "\
Area,Latitude,Longitude,PIN_Code
Shyamnagar,not-a-number,88.3717,743127
";

        assert!(read_roster(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_roster(Path::new("/nonexistent/roster.csv"));

        assert!(matches!(result, Err(RosterError::Io(_))));
    }
}
