//! School profile registry.
//!
//! Profiles are TOML documents. The default profile is baked into the
//! binary at compile time via [`include_str!`], so every tool works out of
//! the box with no configuration; pointing a tool at a different school is
//! a matter of passing a profile path.

use std::path::Path;

use student_map_roster_models::school::SchoolProfile;

use crate::RosterError;

/// Default profile embedded at compile time.
const DEFAULT_SCHOOL_TOML: &str = include_str!("../schools/st_augustines.toml");

/// Parses a school profile from TOML text.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or missing a required field.
pub fn parse_school_toml(toml_str: &str) -> Result<SchoolProfile, toml::de::Error> {
    toml::de::from_str(toml_str)
}

/// Returns the embedded default school profile.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed.
#[must_use]
pub fn default_school() -> SchoolProfile {
    parse_school_toml(DEFAULT_SCHOOL_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded school profile: {e}"))
}

/// Loads a school profile from a TOML file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_school(path: &Path) -> Result<SchoolProfile, RosterError> {
    let toml_str = std::fs::read_to_string(path)?;
    let school = parse_school_toml(&toml_str)?;

    log::debug!("Loaded school profile {} from {}", school.id, path.display());

    Ok(school)
}

/// Loads the profile at `path`, or the embedded default when no path is
/// given.
///
/// # Errors
///
/// Returns an error if a path is given and cannot be read or parsed.
pub fn resolve_school(path: Option<&Path>) -> Result<SchoolProfile, RosterError> {
    path.map_or_else(|| Ok(default_school()), load_school)
}
