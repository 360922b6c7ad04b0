//! CORS middleware configuration for cross-origin requests.
//!
//! The browser front-ends send the session cookie, so credentials are
//! allowed whenever the origin list is explicit.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use eb_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// A `*` entry allows any origin. Credentials are never
/// combined with a wildcard origin.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("CORS allows any origin");
        return cors.allow_any_origin();
    }

    for origin in config
        .allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        tracing::info!(origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
