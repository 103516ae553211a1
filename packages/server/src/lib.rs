#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the student map application.
//!
//! Serves the ranked area summary as JSON and `GeoJSON` for the map
//! frontend, plus the school identity and view hints. The roster is read
//! once at startup; every request recomputes the aggregation from the
//! in-memory roster, so filter overrides never observe a stale summary.
//! Pre-generated artifacts are served as static files under `/data`.

mod handlers;
pub mod interactive;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use student_map_roster::registry::resolve_school;
use student_map_roster::{StudentRecord, load_valid_roster};
use student_map_roster_models::school::SchoolProfile;

/// Shared application state.
pub struct AppState {
    /// The school everything is measured from.
    pub school: SchoolProfile,
    /// Validated roster rows, loaded once at startup.
    pub roster: Vec<StudentRecord>,
}

/// Starts the student map API server.
///
/// Loads the school profile (`SCHOOL_PROFILE` env var, or the embedded
/// default) and the roster CSV (`ROSTER_CSV` env var, or the profile's
/// `roster_path`), then binds to `BIND_ADDR`:`PORT` (default
/// `127.0.0.1:8080`). This is a regular async function; the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the school profile or the roster CSV cannot be loaded; the
/// server has nothing to serve without them.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    log::info!("Loading school profile...");
    let school_path = std::env::var("SCHOOL_PROFILE").ok().map(PathBuf::from);
    let school = resolve_school(school_path.as_deref()).expect("Failed to load school profile");

    let roster_path = std::env::var("ROSTER_CSV")
        .map_or_else(|_| PathBuf::from(&school.roster_path), PathBuf::from);
    log::info!("Loading roster from {}", roster_path.display());
    let roster = load_valid_roster(&roster_path).expect("Failed to load roster CSV");
    log::info!("Serving {} students for {}", roster.len(), school.name);

    let state = web::Data::new(AppState { school, roster });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/school", web::get().to(handlers::school))
                    .route("/areas", web::get().to(handlers::areas))
                    .route("/map", web::get().to(handlers::map)),
            )
            // Serve pre-generated artifacts
            .service(Files::new("/data", student_map_generate::output_dir()).show_files_listing())
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
