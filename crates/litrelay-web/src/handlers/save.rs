//! Persistence endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use litrelay_pubmed::ArticleRecord;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub records: Vec<ArticleRecord>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
}

/// POST /save — upsert the given records into the articles table as one
/// transaction.
pub async fn save(
    State(state): State<SharedState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let database_url = state
        .config
        .database_url
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("DATABASE_URL is required"))?;

    let saved = litrelay_db::save_records(database_url, &req.records).await?;
    Ok(Json(SaveResponse { saved }))
}
