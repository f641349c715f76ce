//! Service descriptor and reachability handlers

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Reachability response
#[derive(Serialize, ToSchema)]
pub struct TestResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "API is reachable")]
    pub message: String,
}

/// Reachability check
#[utoipa::path(
    get,
    path = "/api/test",
    tag = "health",
    responses(
        (status = 200, description = "Service is reachable", body = TestResponse)
    )
)]
pub async fn api_test() -> Json<TestResponse> {
    Json(TestResponse {
        status: "ok".to_string(),
        message: "API is reachable".to_string(),
    })
}

#[derive(Serialize, ToSchema)]
pub struct Endpoints {
    pub query: String,
    pub test: String,
}

/// Root service descriptor
#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub status: String,
    pub version: String,
    pub message: String,
    pub docs: String,
    pub endpoints: Endpoints,
    pub environment: String,
    pub health: String,
    pub model: String,
}

/// Service descriptor
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service descriptor", body = RootResponse)
    )
)]
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "online".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Smart Tutor API is running".to_string(),
        docs: "/docs".to_string(),
        endpoints: Endpoints {
            query: "/api/query".to_string(),
            test: "/api/test".to_string(),
        },
        environment: state.config.server.environment.clone(),
        health: "OK".to_string(),
        model: state.config.llm.model.clone(),
    })
}
