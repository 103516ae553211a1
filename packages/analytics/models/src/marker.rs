//! Marker sizing for map rendering.
//!
//! Area markers scale linearly with student count into a fixed radius
//! band, so the largest area always renders at the same size regardless of
//! school. The school itself gets a fixed radius outside that band.

use crate::AreaSummary;

/// Fixed radius of the school marker.
pub const SCHOOL_MARKER_RADIUS: f64 = 8.0;

/// Smallest area marker radius.
pub const MIN_MARKER_RADIUS: f64 = 1.0;

/// Largest area marker radius, given to the set's biggest area.
pub const MAX_MARKER_RADIUS: f64 = 10.0;

/// Largest student count in the set, floored at 1 so radius scaling never
/// divides by zero on an empty set.
#[must_use]
pub fn max_students(rows: &[AreaSummary]) -> u32 {
    rows.iter().map(|row| row.students).max().map_or(1, |m| m.max(1))
}

/// Scales a student count into the marker radius band, proportional to the
/// set maximum.
#[must_use]
pub fn radius(students: u32, max_students: u32) -> f64 {
    let ratio = f64::from(students) / f64::from(max_students.max(1));

    MIN_MARKER_RADIUS + (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS) * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(students: u32) -> AreaSummary {
        AreaSummary::new("Naihati".to_string(), 22.8895, 88.4184, students)
    }

    #[test]
    fn largest_area_gets_the_maximum_radius() {
        assert!((radius(40, 40) - MAX_MARKER_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn radius_scales_linearly_between_bounds() {
        assert!((radius(20, 40) - 5.5).abs() < 1e-9);
        assert!((radius(10, 40) - 3.25).abs() < 1e-9);
    }

    #[test]
    fn radius_never_divides_by_zero() {
        assert!(radius(5, 0).is_finite());
    }

    #[test]
    fn max_students_finds_the_largest_row() {
        let rows = vec![row(3), row(17), row(9)];

        assert_eq!(max_students(&rows), 17);
    }

    #[test]
    fn max_students_falls_back_to_one_when_empty() {
        assert_eq!(max_students(&[]), 1);
    }
}
