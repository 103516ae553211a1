//! HTTP handler functions for the student map API.

use actix_web::{HttpResponse, web};
use student_map_analytics::compute;
use student_map_analytics_models::AggregateOptions;
use student_map_generate::map_feature_collection;
use student_map_roster_models::school::SchoolProfile;
use student_map_server_models::{ApiArea, ApiHealth, ApiSchool, AreaQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/school`
///
/// Returns the school identity and the frontend's initial view hints.
pub async fn school(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiSchool::from(&state.school))
}

/// `GET /api/areas`
///
/// Recomputes the ranked area summary for the roster, applying the
/// query's filter overrides on top of the profile defaults.
pub async fn areas(
    state: web::Data<AppState>,
    params: web::Query<AreaQueryParams>,
) -> HttpResponse {
    let options = resolve_options(&state.school, &params);
    let rows = compute(&state.roster, options);

    HttpResponse::Ok().json(ApiArea::from_summaries(rows))
}

/// `GET /api/map`
///
/// The same aggregation as `/api/areas`, delivered as a `GeoJSON`
/// `FeatureCollection` with the school marker first.
pub async fn map(state: web::Data<AppState>, params: web::Query<AreaQueryParams>) -> HttpResponse {
    let options = resolve_options(&state.school, &params);
    let rows = compute(&state.roster, options);
    let collection = map_feature_collection(&state.school, &rows);

    HttpResponse::Ok()
        .content_type("application/geo+json")
        .body(collection.to_string())
}

/// Folds the query parameters over the profile's filter defaults: the
/// boolean toggles replace the profile's, and the explicit threshold and
/// cutoff win over both.
fn resolve_options(school: &SchoolProfile, params: &AreaQueryParams) -> AggregateOptions {
    let exclude_small = params.exclude_small.unwrap_or(school.filters.exclude_small);
    let only_top20 = params.only_top20.unwrap_or(school.filters.only_top20);

    let mut options = AggregateOptions::new(school.latitude, school.longitude)
        .with_toggles(exclude_small, only_top20);
    if let Some(min_students) = params.min_students {
        options.min_students = Some(min_students);
    }
    if let Some(top_n) = params.top_n {
        options.top_n = Some(top_n);
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_map_roster_models::school::{FilterDefaults, MapView};

    fn school_profile() -> SchoolProfile {
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

    #[test]
    fn profile_defaults_apply_when_the_query_is_empty() {
        let options = resolve_options(&school_profile(), &AreaQueryParams::default());

        assert_eq!(options.min_students, Some(10));
        assert_eq!(options.top_n, None);
    }

    #[test]
    fn query_toggles_override_the_profile() {
        let params = AreaQueryParams {
            exclude_small: Some(false),
            only_top20: Some(true),
            ..AreaQueryParams::default()
        };

        let options = resolve_options(&school_profile(), &params);

        assert_eq!(options.min_students, None);
        assert_eq!(options.top_n, Some(20));
    }

    #[test]
    fn explicit_thresholds_win_over_toggles() {
        let params = AreaQueryParams {
            exclude_small: Some(true),
            min_students: Some(5),
            top_n: Some(3),
            ..AreaQueryParams::default()
        };

        let options = resolve_options(&school_profile(), &params);

        assert_eq!(options.min_students, Some(5));
        assert_eq!(options.top_n, Some(3));
    }

    #[test]
    fn origin_comes_from_the_profile() {
        let options = resolve_options(&school_profile(), &AreaQueryParams::default());

        assert!((options.origin_lat - 22.769_140).abs() < 1e-9);
        assert!((options.origin_lon - 88.343_714).abs() < 1e-9);
    }
}
