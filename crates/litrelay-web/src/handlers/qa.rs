//! Question-answering endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use litrelay_llm::GeminiClient;

use crate::error::ApiError;
use crate::state::SharedState;

fn default_top_k() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct QaRequest {
    pub question: String,
    /// Hard cap on returned rows; also caps any LIMIT the model emits.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Optional override of the configured generation model.
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QaResponse {
    /// The exact SQL text that was executed.
    pub sql: String,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// POST /qa — draft a read-only SELECT with Gemini, validate and cap it
/// locally, execute it, and return the SQL with its rows.
pub async fn qa(
    State(state): State<SharedState>,
    Json(req): Json<QaRequest>,
) -> Result<Json<QaResponse>, ApiError> {
    let api_key = state
        .config
        .gemini_api_key
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("GEMINI_API_KEY (or GOOGLE_API_KEY) is required"))?;
    let database_url = state
        .config
        .database_url
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("DATABASE_URL is required"))?;

    let model = req
        .model
        .as_deref()
        .unwrap_or(&state.config.gemini_model);

    let llm = GeminiClient::new(api_key);
    let answer =
        litrelay_qa::answer_question(&llm, database_url, model, &req.question, req.top_k).await?;

    Ok(Json(QaResponse {
        sql: answer.sql,
        rows: answer.rows,
    }))
}
