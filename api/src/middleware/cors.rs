//! CORS configuration for browser clients.
//!
//! Development is permissive; production restricts origins to the
//! `ALLOWED_ORIGINS` environment variable. The environment is read once
//! in [`create_cors`]; the builders themselves are pure so they can be
//! exercised without touching process-wide state.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;
use tracing::info;

const DEFAULT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the current environment.
///
/// # Environment Variables
/// - `ENVIRONMENT`: Set to "production" for production settings
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let allowed_origins = env::var("ALLOWED_ORIGINS").ok();
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    build_cors(&environment, allowed_origins.as_deref(), max_age)
}

/// Build the CORS policy from explicit parameters.
fn build_cors(environment: &str, allowed_origins: Option<&str>, max_age: usize) -> Cors {
    if environment == "production" {
        create_production_cors(allowed_origins, max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::ORIGIN,
    ]
}

fn create_development_cors(max_age: usize) -> Cors {
    info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .max_age(max_age)
}

fn create_production_cors(allowed_origins: Option<&str>, max_age: usize) -> Cors {
    info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .supports_credentials()
        .max_age(max_age);

    for origin in parse_allowed_origins(allowed_origins.unwrap_or("")) {
        info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Split a comma-separated origin list, trimming whitespace and dropping
/// empty entries.
fn parse_allowed_origins(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_trims_and_skips_empties() {
        assert_eq!(
            parse_allowed_origins("https://app.textmill.io, https://admin.textmill.io"),
            vec!["https://app.textmill.io", "https://admin.textmill.io"]
        );
        assert_eq!(
            parse_allowed_origins(" https://app.textmill.io ,, "),
            vec!["https://app.textmill.io"]
        );
        assert!(parse_allowed_origins("").is_empty());
    }

    #[test]
    fn test_build_cors_for_both_environments() {
        let _development = build_cors("development", None, DEFAULT_MAX_AGE);
        let _production = build_cors(
            "production",
            Some("https://app.textmill.io,https://admin.textmill.io"),
            7200,
        );
        let _production_without_origins = build_cors("production", None, DEFAULT_MAX_AGE);
    }
}
