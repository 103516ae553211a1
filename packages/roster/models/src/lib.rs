#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core record types shared by the roster loader and everything downstream.

pub mod school;

use serde::{Deserialize, Serialize};

/// One student row as it appears in the roster CSV.
///
/// The serde names match the CSV column headers exactly, case included, so
/// a roster with renamed or reordered-but-matching headers deserializes
/// without any manual column mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Named locality the student lives in.
    #[serde(rename = "Area")]
    pub area: String,

    /// Home latitude in WGS84 decimal degrees.
    #[serde(rename = "Latitude")]
    pub latitude: f64,

    /// Home longitude in WGS84 decimal degrees.
    #[serde(rename = "Longitude")]
    pub longitude: f64,

    /// Indian postal PIN code. Placeholder exports use `0` or negative
    /// values for unknown addresses.
    #[serde(rename = "PIN_Code")]
    pub pin_code: i64,
}

impl StudentRecord {
    /// Whether this row should take part in aggregation.
    ///
    /// Rows with a non-positive PIN code are considered address-less
    /// placeholders and are dropped silently by the loader.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.pin_code > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pin_code: i64) -> StudentRecord {
        StudentRecord {
            area: "Shyamnagar".to_string(),
            latitude: 22.8295,
            longitude: 88.3717,
            pin_code,
        }
    }

    #[test]
    fn positive_pin_code_is_valid() {
        assert!(record(743_127).is_valid());
        assert!(record(1).is_valid());
    }

    #[test]
    fn zero_and_negative_pin_codes_are_invalid() {
        assert!(!record(0).is_valid());
        assert!(!record(-1).is_valid());
    }
}
