//! Smart Tutor API - REST server
//!
//! Provides HTTP endpoints for composing tutoring prompts and returning
//! the provider's generated text.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Tutor API",
        description = "An AI-powered learning platform for all subjects"
    ),
    paths(
        handlers::query::query_handler,
        handlers::health::api_test,
        handlers::health::root,
    ),
    components(schemas(
        handlers::query::QueryRequest,
        handlers::query::QueryResponse,
        handlers::health::TestResponse,
        handlers::health::RootResponse,
        handlers::health::Endpoints,
        error::ApiError,
    )),
    tags(
        (name = "query", description = "Tutoring prompts"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = middleware::cors_layer(&state.config.server);

    Router::new()
        .route("/", get(handlers::health::root))
        .nest("/api", routes::api_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
