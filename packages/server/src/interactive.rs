//! Interactive mode for the server.
//!
//! Prompts for the school profile, roster and bind address before starting
//! the server.

use dialoguer::{Confirm, Input};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Answers are handed to [`super::run_server`] through the environment
/// variables it reads (`SCHOOL_PROFILE`, `ROSTER_CSV`, `BIND_ADDR`,
/// `PORT`); blank answers keep the defaults.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Student Map Server");
    println!();

    let school_path: String = Input::new()
        .with_prompt("School profile TOML (blank for the built-in default)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    let roster_path: String = Input::new()
        .with_prompt("Roster CSV (blank for the profile's roster path)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default("8080".to_string())
        .interact_text()
        .unwrap_or_else(|_| "8080".to_string());

    // SAFETY: We are single-threaded at this point (before the server
    // starts) and these variables are only read once during server
    // initialisation.
    unsafe {
        if !school_path.is_empty() {
            std::env::set_var("SCHOOL_PROFILE", &school_path);
        }
        if !roster_path.is_empty() {
            std::env::set_var("ROSTER_CSV", &roster_path);
        }
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port_str}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
