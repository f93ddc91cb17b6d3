//! Error-to-response mapping for all handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use litrelay_qa::QaError;

/// A handler failure with its HTTP status and human-readable cause.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<litrelay_pubmed::PubMedError> for ApiError {
    fn from(err: litrelay_pubmed::PubMedError) -> Self {
        Self::internal(format!("PubMed error: {err}"))
    }
}

impl From<litrelay_llm::LlmError> for ApiError {
    fn from(err: litrelay_llm::LlmError) -> Self {
        Self::internal(format!("LLM error: {err}"))
    }
}

impl From<litrelay_db::DbError> for ApiError {
    fn from(err: litrelay_db::DbError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<QaError> for ApiError {
    fn from(err: QaError) -> Self {
        match err {
            // Rejections carry the offending SQL for diagnosis.
            QaError::Rejected(_) => Self::bad_request(err.to_string()),
            QaError::Llm(_) | QaError::Execution(_) => Self::internal(err.to_string()),
        }
    }
}
