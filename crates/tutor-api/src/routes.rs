//! API route definitions

use crate::handlers::{health, query};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create `/api` routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/query", post(query::query_handler))
        .route("/test", get(health::api_test))
}
