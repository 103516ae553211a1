#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Artifact generation for the map and table frontends.
//!
//! Writes three files per run: a `GeoJSON` `FeatureCollection` of area
//! markers plus the school marker, the area summary CSV, and a
//! `metadata.json` with the school identity, map view hints and run
//! context. Files go through a `.tmp` sibling and a rename, so readers
//! never observe a partially written artifact.

use std::path::{Path, PathBuf};
use std::time::Instant;

use geojson::Feature;
use student_map_analytics_models::marker::{self, SCHOOL_MARKER_RADIUS};
use student_map_analytics_models::{AggregateOptions, AreaSummary};
use student_map_roster_models::school::SchoolProfile;

/// File name of the area marker `FeatureCollection`.
pub const OUTPUT_AREAS_GEOJSON: &str = "areas.geojson";

/// File name of the area summary table.
pub const OUTPUT_SUMMARY_CSV: &str = "area_summary.csv";

/// File name of the frontend metadata document.
pub const OUTPUT_METADATA: &str = "metadata.json";

/// Summary CSV header, in column order.
const SUMMARY_COLUMNS: [&str; 7] = [
    "Area",
    "Latitude",
    "Longitude",
    "students",
    "distance_km",
    "percent",
    "rank",
];

/// Returns the default artifact directory, `data/generated` under the
/// workspace root.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR` so output paths do
/// not depend on the caller's working directory.
///
/// # Panics
///
/// Panics if the project root cannot be resolved from
/// `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .join("data/generated")
}

fn point_feature(latitude: f64, longitude: f64) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
            longitude, latitude,
        ]))),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

fn school_feature(school: &SchoolProfile) -> Feature {
    let mut feature = point_feature(school.latitude, school.longitude);
    feature.set_property("kind", "school");
    feature.set_property("name", school.name.clone());
    feature.set_property("radius", SCHOOL_MARKER_RADIUS);
    feature
}

fn area_feature(row: &AreaSummary, max_students: u32) -> Feature {
    let mut feature = point_feature(row.latitude, row.longitude);
    feature.set_property("kind", "area");
    feature.set_property("area", row.area.clone());
    feature.set_property("students", row.students);
    feature.set_property("distanceKm", row.distance_km);
    feature.set_property("percent", row.percent);
    feature.set_property("rank", row.rank);
    feature.set_property("radius", marker::radius(row.students, max_students));
    feature
}

/// Builds the marker `FeatureCollection`: the school first, then one
/// feature per area row in the order given. Marker radii scale against
/// the set's largest student count.
#[must_use]
pub fn map_feature_collection(
    school: &SchoolProfile,
    rows: &[AreaSummary],
) -> geojson::FeatureCollection {
    let max_students = marker::max_students(rows);

    std::iter::once(school_feature(school))
        .chain(rows.iter().map(|row| area_feature(row, max_students)))
        .collect()
}

/// Writes the summary table as CSV, headers included even when the set is
/// empty.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_summary_csv<W: std::io::Write>(
    writer: W,
    rows: &[AreaSummary],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        // Serde only emits the header alongside the first row; an empty
        // set still gets its header line.
        csv_writer.write_record(SUMMARY_COLUMNS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Builds the `metadata.json` document: school identity, map view hints,
/// the filters the run was computed with, and set totals.
#[must_use]
pub fn metadata_json(
    school: &SchoolProfile,
    options: AggregateOptions,
    rows: &[AreaSummary],
) -> serde_json::Value {
    let students: u32 = rows.iter().map(|row| row.students).sum();

    serde_json::json!({
        "school": {
            "id": school.id,
            "name": school.name,
            "latitude": school.latitude,
            "longitude": school.longitude,
        },
        "mapView": {
            "zoom": school.map.zoom,
            "minZoom": school.map.min_zoom,
            "maxZoom": school.map.max_zoom,
            "fitBounds": school.map.fit_bounds(school.latitude, school.longitude),
        },
        "filters": {
            "minStudents": options.min_students,
            "topN": options.top_n,
        },
        "totals": {
            "areas": rows.len(),
            "students": students,
        },
        "generatedAt": chrono::Utc::now().to_rfc3339(),
    })
}

fn write_atomic(dir: &Path, name: &str, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let tmp_path = dir.join(format!("{name}.tmp"));
    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(path)
}

/// Writes all three artifacts for one computed summary set into `dir`,
/// creating the directory if needed.
///
/// # Errors
///
/// Returns an error if any artifact cannot be serialized or written.
pub fn write_artifacts(
    dir: &Path,
    school: &SchoolProfile,
    options: AggregateOptions,
    rows: &[AreaSummary],
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    std::fs::create_dir_all(dir)?;

    let collection = geojson::GeoJson::from(map_feature_collection(school, rows));
    let path = write_atomic(dir, OUTPUT_AREAS_GEOJSON, &collection.to_string())?;
    log::info!("Area markers generated: {}", path.display());

    let tmp_path = dir.join(format!("{OUTPUT_SUMMARY_CSV}.tmp"));
    write_summary_csv(std::fs::File::create(&tmp_path)?, rows)?;
    let path = dir.join(OUTPUT_SUMMARY_CSV);
    std::fs::rename(&tmp_path, &path)?;
    log::info!("Summary table generated: {}", path.display());

    let metadata = serde_json::to_string_pretty(&metadata_json(school, options, rows))?;
    let path = write_atomic(dir, OUTPUT_METADATA, &metadata)?;
    log::info!("Frontend metadata generated: {}", path.display());

    log::info!(
        "Generated 3 artifacts ({} areas) in {:.1}s",
        rows.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_map_roster_models::school::{FilterDefaults, MapView};

    fn school() -> SchoolProfile {
        SchoolProfile {
            id: "st_augustines".to_string(),
            name: "St Augustine's Day School".to_string(),
            latitude: 22.769_140,
            longitude: 88.343_714,
            roster_path: "Students.csv".to_string(),
            filters: FilterDefaults::default(),
            map: MapView::default(),
        }
    }

    fn row(area: &str, students: u32, rank: u32) -> AreaSummary {
        AreaSummary {
            area: area.to_string(),
            latitude: 22.8295,
            longitude: 88.3717,
            students,
            distance_km: 7.34,
            percent: 50.0,
            rank,
        }
    }

    #[test]
    fn collection_leads_with_the_school_marker() {
        let rows = vec![row("Shyamnagar", 40, 1), row("Ichapur", 20, 2)];

        let collection = map_feature_collection(&school(), &rows);

        assert_eq!(collection.features.len(), 3);
        let first = &collection.features[0];
        assert_eq!(
            first.property("kind").and_then(|v| v.as_str()),
            Some("school")
        );
        assert_eq!(
            first.property("radius").and_then(serde_json::Value::as_f64),
            Some(SCHOOL_MARKER_RADIUS)
        );
    }

    #[test]
    fn area_features_carry_summary_properties() {
        let rows = vec![row("Shyamnagar", 40, 1), row("Ichapur", 20, 2)];

        let collection = map_feature_collection(&school(), &rows);

        let feature = &collection.features[1];
        assert_eq!(
            feature.property("area").and_then(|v| v.as_str()),
            Some("Shyamnagar")
        );
        assert_eq!(
            feature
                .property("students")
                .and_then(serde_json::Value::as_u64),
            Some(40)
        );
        assert_eq!(
            feature
                .property("distanceKm")
                .and_then(serde_json::Value::as_f64),
            Some(7.34)
        );
        assert_eq!(
            feature.property("rank").and_then(serde_json::Value::as_u64),
            Some(1)
        );
    }

    #[test]
    fn largest_area_marker_hits_the_radius_ceiling() {
        let rows = vec![row("Shyamnagar", 40, 1), row("Ichapur", 10, 2)];

        let collection = map_feature_collection(&school(), &rows);

        let radius = collection.features[1]
            .property("radius")
            .and_then(serde_json::Value::as_f64)
            .unwrap();
        assert!((radius - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_yields_a_school_only_collection() {
        let collection = map_feature_collection(&school(), &[]);

        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn summary_csv_keeps_the_pipeline_column_order() {
        let rows = vec![row("Shyamnagar", 40, 1)];

        let mut buffer = Vec::new();
        write_summary_csv(&mut buffer, &rows).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Area,Latitude,Longitude,students,distance_km,percent,rank")
        );
        assert_eq!(lines.next(), Some("Shyamnagar,22.8295,88.3717,40,7.34,50.0,1"));
    }

    #[test]
    fn empty_summary_csv_still_has_a_header() {
        let mut buffer = Vec::new();
        write_summary_csv(&mut buffer, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text.trim_end(),
            "Area,Latitude,Longitude,students,distance_km,percent,rank"
        );
    }

    #[test]
    fn metadata_reports_school_filters_and_totals() {
        let rows = vec![row("Shyamnagar", 40, 1), row("Ichapur", 20, 2)];
        let options = AggregateOptions::new(22.769_140, 88.343_714).with_min_students(10);

        let metadata = metadata_json(&school(), options, &rows);

        assert_eq!(
            metadata["school"]["name"],
            serde_json::json!("St Augustine's Day School")
        );
        assert_eq!(metadata["mapView"]["zoom"], serde_json::json!(12));
        assert_eq!(metadata["filters"]["minStudents"], serde_json::json!(10));
        assert!(metadata["filters"]["topN"].is_null());
        assert_eq!(metadata["totals"]["areas"], serde_json::json!(2));
        assert_eq!(metadata["totals"]["students"], serde_json::json!(60));
        assert!(metadata["generatedAt"].is_string());
    }
}
