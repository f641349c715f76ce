//! CORS policy
//!
//! Cross-origin calls are allowed only from the configured origins, with
//! credentials, for GET/POST/OPTIONS and the Content-Type and
//! Authorization headers.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tutor_core::ServerConfig;

/// Build the CORS layer from server configuration
///
/// Origins that are not valid header values are logged and skipped.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect();

    tracing::debug!(count = origins.len(), "CORS origins configured");

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
