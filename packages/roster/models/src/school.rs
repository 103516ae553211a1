//! School profile types.
//!
//! A profile captures everything site-specific about one school: its name
//! and coordinates, where its roster CSV lives, which summary filters are
//! on by default, and the view hints the map frontend starts from. Every
//! field beyond the identity block has a serde default so a minimal profile
//! only needs `id`, `name`, `latitude` and `longitude`.

use serde::{Deserialize, Serialize};

/// Site-specific configuration for one school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolProfile {
    /// Stable identifier, e.g. `"st_augustines"`.
    pub id: String,

    /// Human-readable school name, used in marker labels and metadata.
    pub name: String,

    /// School latitude in WGS84 decimal degrees. This is the origin every
    /// area distance is measured from.
    pub latitude: f64,

    /// School longitude in WGS84 decimal degrees.
    pub longitude: f64,

    /// Roster CSV path, resolved relative to the working directory.
    #[serde(default = "default_roster_path")]
    pub roster_path: String,

    /// Filter toggles applied when the caller does not override them.
    #[serde(default)]
    pub filters: FilterDefaults,

    /// Initial view hints for the map frontend.
    #[serde(default)]
    pub map: MapView,
}

fn default_roster_path() -> String {
    "Students.csv".to_string()
}

/// Default on/off state of the two summary filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefaults {
    /// Drop areas below the minimum student count.
    #[serde(default = "default_exclude_small")]
    pub exclude_small: bool,

    /// Keep only the top-ranked areas.
    #[serde(default)]
    pub only_top20: bool,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            exclude_small: true,
            only_top20: false,
        }
    }
}

const fn default_exclude_small() -> bool {
    true
}

/// Initial map viewport: zoom levels plus the half-width of the bounding
/// box the frontend fits around the school.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Starting zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Furthest the frontend may zoom out.
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,

    /// Closest the frontend may zoom in.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    /// Half-width, in degrees, of the initial fit bounds around the school.
    #[serde(default = "default_bounds_margin")]
    pub bounds_margin_deg: f64,
}

impl MapView {
    /// South-west and north-east corners of the initial fit bounds,
    /// centered on the given coordinates, as `[lat, lon]` pairs.
    #[must_use]
    pub fn fit_bounds(&self, latitude: f64, longitude: f64) -> [[f64; 2]; 2] {
        [
            [
                latitude - self.bounds_margin_deg,
                longitude - self.bounds_margin_deg,
            ],
            [
                latitude + self.bounds_margin_deg,
                longitude + self.bounds_margin_deg,
            ],
        ]
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            bounds_margin_deg: default_bounds_margin(),
        }
    }
}

const fn default_zoom() -> u8 {
    12
}

const fn default_min_zoom() -> u8 {
    10
}

const fn default_max_zoom() -> u8 {
    16
}

const fn default_bounds_margin() -> f64 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_defaults_exclude_small_areas_only() {
        let filters = FilterDefaults::default();

        assert!(filters.exclude_small);
        assert!(!filters.only_top20);
    }

    #[test]
    fn fit_bounds_centers_on_the_school() {
        let view = MapView::default();

        let bounds = view.fit_bounds(22.769_140, 88.343_714);

        assert!((bounds[0][0] - 22.719_140).abs() < 1e-9);
        assert!((bounds[0][1] - 88.293_714).abs() < 1e-9);
        assert!((bounds[1][0] - 22.819_140).abs() < 1e-9);
        assert!((bounds[1][1] - 88.393_714).abs() < 1e-9);
    }
}
