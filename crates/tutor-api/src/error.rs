//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use std::backtrace::Backtrace;
use tutor_core::TutorError;
use utoipa::ToSchema;

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again with a simpler query.";
pub const UPSTREAM_MESSAGE: &str = "Error processing query. Please try again later.";
pub const INTERNAL_MESSAGE: &str = "Unexpected error occurred. Please try again later.";

/// API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Human-readable, client-safe message
    #[schema(example = "Please provide either a custom question or select both a topic and a query type.")]
    pub detail: String,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    Rejected(JsonRejection),
    Timeout(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::InvalidInput(msg) => {
                tracing::warn!(reason = %msg, "Rejected invalid query");
                (StatusCode::BAD_REQUEST, ApiError::new(msg))
            }
            AppError::Rejected(rejection) => {
                tracing::warn!(reason = %rejection.body_text(), "Rejected malformed request body");
                (rejection.status(), ApiError::new(rejection.body_text()))
            }
            AppError::Timeout(msg) => {
                tracing::error!(error = %msg, "Completion timed out");
                (StatusCode::GATEWAY_TIMEOUT, ApiError::new(TIMEOUT_MESSAGE))
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Completion provider failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(UPSTREAM_MESSAGE))
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while handling query");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(INTERNAL_MESSAGE))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection)
    }
}

impl From<TutorError> for AppError {
    fn from(err: TutorError) -> Self {
        match err {
            TutorError::InvalidInput(msg) => AppError::InvalidInput(msg),
            TutorError::Timeout(limit) => {
                AppError::Timeout(format!("Completion timed out after {limit:?}"))
            }
            TutorError::Upstream(msg) => AppError::Upstream(msg),
            TutorError::ConfigError(msg) => AppError::Internal(format!("Configuration error: {msg}")),
        }
    }
}

/// Turn a handler panic into a generic 500 response
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

/// Log every panic with its location and a captured backtrace, then defer
/// to the previously installed hook.
///
/// Runs on the panicking thread before unwinding starts.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let backtrace = Backtrace::force_capture();

        tracing::error!(
            panic = %info,
            %location,
            %backtrace,
            "Panic while handling request"
        );
        previous(info);
    }));
}
