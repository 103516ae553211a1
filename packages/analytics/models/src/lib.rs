#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation output and option types.
//!
//! An [`AreaSummary`] is one row of the ranked area table; every derived
//! column (`distance_km`, `percent`, `rank`) is rounded or assigned by the
//! pipeline, never by these types. [`AggregateOptions`] carries the origin
//! and the two optional summary filters.

pub mod marker;

use serde::{Deserialize, Serialize};

/// Minimum student count applied by the exclude-small toggle.
pub const DEFAULT_MIN_STUDENTS: u32 = 10;

/// Cutoff applied by the top-20 toggle.
pub const DEFAULT_TOP_N: u32 = 20;

/// One aggregated area row.
///
/// The serde names of the coordinate columns match the roster CSV headers,
/// so the summary CSV reads as a natural extension of the input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    /// Named locality.
    #[serde(rename = "Area")]
    pub area: String,

    /// Latitude shared by every student grouped into this row.
    #[serde(rename = "Latitude")]
    pub latitude: f64,

    /// Longitude shared by every student grouped into this row.
    #[serde(rename = "Longitude")]
    pub longitude: f64,

    /// Number of students at this exact (area, latitude, longitude).
    pub students: u32,

    /// Geodesic distance from the school, in kilometers, two decimals.
    pub distance_km: f64,

    /// Share of the surviving set's students, in percent, two decimals.
    pub percent: f64,

    /// 1-based position when ordered by descending student count.
    pub rank: u32,
}

impl AreaSummary {
    /// Creates a row with its derived columns zeroed; the pipeline fills
    /// `distance_km`, `percent` and `rank` in later passes.
    #[must_use]
    pub const fn new(area: String, latitude: f64, longitude: f64, students: u32) -> Self {
        Self {
            area,
            latitude,
            longitude,
            students,
            distance_km: 0.0,
            percent: 0.0,
            rank: 0,
        }
    }
}

/// Origin and filter settings for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateOptions {
    /// Latitude distances are measured from.
    pub origin_lat: f64,

    /// Longitude distances are measured from.
    pub origin_lon: f64,

    /// Keep only areas with at least this many students.
    pub min_students: Option<u32>,

    /// Keep only the areas ranked inside this cutoff.
    pub top_n: Option<u32>,
}

impl AggregateOptions {
    /// Options with no filters, measuring distances from the given origin.
    #[must_use]
    pub const fn new(origin_lat: f64, origin_lon: f64) -> Self {
        Self {
            origin_lat,
            origin_lon,
            min_students: None,
            top_n: None,
        }
    }

    /// Sets the minimum-size filter.
    #[must_use]
    pub const fn with_min_students(mut self, min_students: u32) -> Self {
        self.min_students = Some(min_students);
        self
    }

    /// Sets the top-N cutoff.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: u32) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Resets both filters from the dashboard's boolean toggles, using the
    /// default threshold and cutoff.
    #[must_use]
    pub const fn with_toggles(mut self, exclude_small: bool, only_top20: bool) -> Self {
        self.min_students = if exclude_small {
            Some(DEFAULT_MIN_STUDENTS)
        } else {
            None
        };
        self.top_n = if only_top20 { Some(DEFAULT_TOP_N) } else { None };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_options_have_no_filters() {
        let options = AggregateOptions::new(22.769_140, 88.343_714);

        assert_eq!(options.min_students, None);
        assert_eq!(options.top_n, None);
    }

    #[test]
    fn toggles_map_to_default_thresholds() {
        let options = AggregateOptions::new(0.0, 0.0).with_toggles(true, true);

        assert_eq!(options.min_students, Some(DEFAULT_MIN_STUDENTS));
        assert_eq!(options.top_n, Some(DEFAULT_TOP_N));
    }

    #[test]
    fn toggles_clear_previous_filters() {
        let options = AggregateOptions::new(0.0, 0.0)
            .with_min_students(5)
            .with_top_n(3)
            .with_toggles(false, false);

        assert_eq!(options.min_students, None);
        assert_eq!(options.top_n, None);
    }

    #[test]
    fn explicit_values_override_toggles() {
        let options = AggregateOptions::new(0.0, 0.0)
            .with_toggles(true, true)
            .with_min_students(5)
            .with_top_n(3);

        assert_eq!(options.min_students, Some(5));
        assert_eq!(options.top_n, Some(3));
    }

    #[test]
    fn new_summary_zeroes_derived_columns() {
        let row = AreaSummary::new("Ichapur".to_string(), 22.8063, 88.3671, 4);

        assert_eq!(row.students, 4);
        assert!((row.distance_km - 0.0).abs() < f64::EPSILON);
        assert!((row.percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(row.rank, 0);
    }
}
