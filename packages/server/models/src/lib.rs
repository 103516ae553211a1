#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the student map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the pipeline row types to allow independent evolution of the API
//! contract.

use serde::{Deserialize, Serialize};
use student_map_analytics_models::{AreaSummary, marker};
use student_map_roster_models::school::SchoolProfile;

/// An aggregated area as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiArea {
    /// Named locality.
    pub area: String,
    /// Latitude of the grouped coordinate.
    pub latitude: f64,
    /// Longitude of the grouped coordinate.
    pub longitude: f64,
    /// Student count at this coordinate.
    pub students: u32,
    /// Geodesic distance from the school in kilometers.
    pub distance_km: f64,
    /// Share of the surviving set's students, in percent.
    pub percent: f64,
    /// 1-based rank by descending student count.
    pub rank: u32,
    /// Marker radius, scaled into the rendering band against the set's
    /// largest area.
    pub radius: f64,
}

impl ApiArea {
    /// Converts one pipeline row, scaling its marker radius against the
    /// given set maximum.
    #[must_use]
    pub fn from_summary(row: AreaSummary, max_students: u32) -> Self {
        Self {
            radius: marker::radius(row.students, max_students),
            area: row.area,
            latitude: row.latitude,
            longitude: row.longitude,
            students: row.students,
            distance_km: row.distance_km,
            percent: row.percent,
            rank: row.rank,
        }
    }

    /// Converts a whole summary set, preserving order.
    #[must_use]
    pub fn from_summaries(rows: Vec<AreaSummary>) -> Vec<Self> {
        let max_students = marker::max_students(&rows);

        rows.into_iter()
            .map(|row| Self::from_summary(row, max_students))
            .collect()
    }
}

/// The school identity and view hints as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSchool {
    /// Stable school identifier.
    pub id: String,
    /// Human-readable school name.
    pub name: String,
    /// School latitude.
    pub latitude: f64,
    /// School longitude.
    pub longitude: f64,
    /// Fixed radius of the school marker.
    pub radius: f64,
    /// Initial viewport for the map frontend.
    pub map_view: ApiMapView,
}

/// Initial map viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapView {
    /// Starting zoom level.
    pub zoom: u8,
    /// Furthest the frontend may zoom out.
    pub min_zoom: u8,
    /// Closest the frontend may zoom in.
    pub max_zoom: u8,
    /// South-west and north-east corners as `[lat, lon]` pairs.
    pub fit_bounds: [[f64; 2]; 2],
}

impl From<&SchoolProfile> for ApiSchool {
    fn from(school: &SchoolProfile) -> Self {
        Self {
            id: school.id.clone(),
            name: school.name.clone(),
            latitude: school.latitude,
            longitude: school.longitude,
            radius: marker::SCHOOL_MARKER_RADIUS,
            map_view: ApiMapView {
                zoom: school.map.zoom,
                min_zoom: school.map.min_zoom,
                max_zoom: school.map.max_zoom,
                fit_bounds: school.map.fit_bounds(school.latitude, school.longitude),
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the areas and map endpoints.
///
/// The boolean toggles override the school profile's defaults; the
/// explicit threshold and cutoff win over the toggles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaQueryParams {
    /// Overrides the profile's exclude-small default.
    pub exclude_small: Option<bool>,
    /// Overrides the profile's top-20 default.
    pub only_top20: Option<bool>,
    /// Explicit minimum student count.
    pub min_students: Option<u32>,
    /// Explicit top-N cutoff.
    pub top_n: Option<u32>,
}
