#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Area aggregation pipeline.
//!
//! Turns validated roster rows into the ranked area table: group by the
//! exact (area, latitude, longitude) triple, annotate geodesic distance
//! from the school, annotate percent share and rank, then apply the
//! optional summary filters. Percent and rank are always relative to the
//! set that survives filtering, so each filter step re-runs the
//! annotation. Every call recomputes from scratch; nothing is cached
//! between runs.

use std::collections::BTreeMap;

use geo::{Distance, Geodesic, Point};
use student_map_analytics_models::{AggregateOptions, AreaSummary};
use student_map_roster_models::StudentRecord;

/// Rounds to two decimal places, the precision of every derived column.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Geodesic distance between the origin and a point, in kilometers,
/// rounded to two decimals.
///
/// Measured on the WGS84 ellipsoid (Karney's algorithm), not a spherical
/// approximation, so results line up with surveyed distances to within
/// centimeters before rounding.
#[must_use]
pub fn distance_km(origin_lat: f64, origin_lon: f64, latitude: f64, longitude: f64) -> f64 {
    let meters = Geodesic.distance(
        Point::new(origin_lon, origin_lat),
        Point::new(longitude, latitude),
    );

    round2(meters / 1000.0)
}

/// Groups records by the exact (area, latitude, longitude) triple and
/// counts students per group.
///
/// Coordinates are compared bit-for-bit with no snapping or tolerance, so
/// one area name listed at two coordinates produces two rows. Rows come
/// back ordered by area name, then latitude, then longitude; derived
/// columns are zeroed.
#[must_use]
pub fn group_by_area(records: &[StudentRecord]) -> Vec<AreaSummary> {
    // Bit patterns stand in for the floats so the key is totally ordered;
    // equality stays exact.
    let mut counts: BTreeMap<(&str, u64, u64), u32> = BTreeMap::new();

    for record in records {
        let key = (
            record.area.as_str(),
            record.latitude.to_bits(),
            record.longitude.to_bits(),
        );
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut rows: Vec<AreaSummary> = counts
        .into_iter()
        .map(|((area, lat_bits, lon_bits), students)| {
            AreaSummary::new(
                area.to_string(),
                f64::from_bits(lat_bits),
                f64::from_bits(lon_bits),
                students,
            )
        })
        .collect();

    // Re-sort numerically; bit order and numeric order disagree for
    // negative coordinates.
    rows.sort_by(|a, b| {
        a.area
            .cmp(&b.area)
            .then_with(|| a.latitude.total_cmp(&b.latitude))
            .then_with(|| a.longitude.total_cmp(&b.longitude))
    });

    rows
}

/// Fills `distance_km` for every row, measured from the given origin.
pub fn annotate_distance(rows: &mut [AreaSummary], origin_lat: f64, origin_lon: f64) {
    for row in rows {
        row.distance_km = distance_km(origin_lat, origin_lon, row.latitude, row.longitude);
    }
}

/// Fills `percent` against the set total, orders rows by descending
/// student count and assigns 1-based ranks.
///
/// Equal counts order by ascending area name, then coordinates, so ties
/// always resolve the same way regardless of input order. An empty set is
/// a no-op; a zero total yields 0.0 percents rather than dividing by zero.
pub fn annotate_rank_and_percent(rows: &mut [AreaSummary]) {
    let total: u32 = rows.iter().map(|row| row.students).sum();

    for row in &mut *rows {
        row.percent = if total == 0 {
            0.0
        } else {
            round2(f64::from(row.students) / f64::from(total) * 100.0)
        };
    }

    rows.sort_by(|a, b| {
        b.students
            .cmp(&a.students)
            .then_with(|| a.area.cmp(&b.area))
            .then_with(|| a.latitude.total_cmp(&b.latitude))
            .then_with(|| a.longitude.total_cmp(&b.longitude))
    });

    let mut rank = 0;
    for row in &mut *rows {
        rank += 1;
        row.rank = rank;
    }
}

/// Applies the minimum-size and top-N filters.
///
/// Each filter that fires re-runs [`annotate_rank_and_percent`], so
/// percent and rank describe the surviving set. The top-N cutoff keys on
/// the ranks computed before the cutoff; survivors are then renumbered.
#[must_use]
pub fn apply_filters(mut rows: Vec<AreaSummary>, options: AggregateOptions) -> Vec<AreaSummary> {
    if let Some(min_students) = options.min_students {
        let before = rows.len();
        rows.retain(|row| row.students >= min_students);
        if rows.len() < before {
            log::debug!(
                "Minimum-size filter ({min_students}) dropped {} of {before} areas",
                before - rows.len()
            );
        }
        annotate_rank_and_percent(&mut rows);
    }

    if let Some(top_n) = options.top_n {
        let before = rows.len();
        rows.retain(|row| row.rank <= top_n);
        if rows.len() < before {
            log::debug!(
                "Top-{top_n} cutoff dropped {} of {before} areas",
                before - rows.len()
            );
        }
        annotate_rank_and_percent(&mut rows);
    }

    rows
}

/// Runs the whole pipeline over already-validated records.
#[must_use]
pub fn compute(records: &[StudentRecord], options: AggregateOptions) -> Vec<AreaSummary> {
    let mut rows = group_by_area(records);
    annotate_distance(&mut rows, options.origin_lat, options.origin_lon);
    annotate_rank_and_percent(&mut rows);

    let rows = apply_filters(rows, options);

    log::debug!(
        "Aggregated {} records into {} areas",
        records.len(),
        rows.len()
    );

    rows
}
