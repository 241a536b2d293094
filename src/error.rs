use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::NoteId;

/// Failure of a round trip to the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("note {0} was not readable right after insertion")]
    MissingAfterInsert(NoteId),

    #[error("store assigned a non-ObjectId key: {0}")]
    UnexpectedId(String),
}

/// One entry of a 422 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationIssue {
    /// Path to the offending value, e.g. `["body", "title"]`
    pub loc: Vec<String>,
    /// Human readable message
    pub msg: String,
    /// Machine readable category
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(ToString::to_string).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// Everything a REST handler can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<ValidationIssue>),

    #[error("Note '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_error",
        };

        Self::Validation(vec![ValidationIssue::new(
            &["body"],
            rejection.body_text(),
            kind,
        )])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(issues) => {
                tracing::debug!("rejected request body: {:?}", issues);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": issues })),
                )
                    .into_response()
            }
            Self::NotFound(_) => {
                let detail = self.to_string();
                tracing::debug!("{}", detail);
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Store(e) => {
                tracing::error!("store round trip failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
