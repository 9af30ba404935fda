use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds the CORS layer from configuration.
///
/// An empty origin list yields `CorsLayer::permissive()`; configuration loading
/// refuses that combination in production.
///
/// Explicit origins get:
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value.
pub fn cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    if config.is_permissive() {
        tracing::warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    tracing::info!(origins = ?config.allowed_origins, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .max_age(Duration::from_secs(3600)))
}
