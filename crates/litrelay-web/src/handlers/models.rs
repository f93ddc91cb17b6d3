//! Gemini model listing.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use litrelay_llm::GeminiClient;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Short model ids supporting generateContent, sorted and unique.
    pub models: Vec<String>,
}

/// GET /models
pub async fn list_models(
    State(state): State<SharedState>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let api_key = state.config.gemini_api_key.as_deref().ok_or_else(|| {
        ApiError::bad_request("Set GEMINI_API_KEY or GOOGLE_API_KEY to list models")
    })?;

    let models = GeminiClient::new(api_key).list_generation_models().await?;
    Ok(Json(ModelsResponse { models }))
}
