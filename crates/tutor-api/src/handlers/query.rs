//! Tutor query handler

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tutor_engine::TutorQuery;
use utoipa::ToSchema;

/// Query request body
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct QueryRequest {
    /// Topic to study; required together with `query_type` unless a
    /// custom question is given
    #[schema(example = "photosynthesis")]
    pub topic: Option<String>,

    /// Subject area; unknown values fall back to general knowledge
    #[schema(example = "science", default = "technology")]
    pub subject: Option<String>,

    /// One of explanation, study_notes, quiz, examples, hands_on,
    /// learning_path, visualization, custom
    #[schema(example = "quiz")]
    pub query_type: Option<String>,

    /// Free-text question
    #[schema(example = "")]
    pub custom_question: Option<String>,
}

impl From<QueryRequest> for TutorQuery {
    fn from(req: QueryRequest) -> Self {
        Self {
            topic: req.topic,
            subject: req.subject,
            query_type: req.query_type,
            custom_question: req.custom_question,
        }
    }
}

/// Query response body
#[derive(Debug, Serialize, ToSchema)]
pub struct QueryResponse {
    /// Generated tutoring text
    #[schema(example = "1. Which pigment absorbs light in photosynthesis? ...")]
    pub result: String,

    /// Always "success"
    #[schema(example = "success")]
    pub status: String,
}

/// Handle tutor query requests
#[utoipa::path(
    post,
    path = "/api/query",
    tag = "query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Query successful", body = QueryResponse),
        (status = 400, description = "Invalid request", body = crate::error::ApiError),
        (status = 500, description = "Internal or provider error", body = crate::error::ApiError),
        (status = 504, description = "Completion timed out", body = crate::error::ApiError)
    )
)]
pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(req) = payload?;

    tracing::debug!(
        topic = ?req.topic,
        subject = ?req.subject,
        query_type = ?req.query_type,
        "Received query"
    );

    let result = state.engine.answer(req.into()).await?;

    Ok(Json(QueryResponse {
        result,
        status: "success".to_string(),
    }))
}
