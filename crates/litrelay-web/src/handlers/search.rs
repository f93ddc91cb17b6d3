//! PubMed search endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use litrelay_pubmed::client::DateRange;
use litrelay_pubmed::{ArticleRecord, PubMedClient};

use crate::error::ApiError;
use crate::state::SharedState;

fn default_retmax() -> usize {
    50
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_retmax")]
    pub retmax: usize,
    /// YYYY/MM/DD (or any granularity PubMed accepts)
    pub mindate: Option<String>,
    pub maxdate: Option<String>,
    #[serde(default = "default_true")]
    pub include_abstracts: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub records: Vec<ArticleRecord>,
}

/// POST /search — esearch, then esummary or the full abstract path.
///
/// A query with no hits returns an empty record list without any further
/// upstream calls.
pub async fn search(
    State(state): State<SharedState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::bad_request("query is required"));
    }
    if req.retmax < 1 || req.retmax > 1000 {
        return Err(ApiError::bad_request("retmax must be between 1 and 1000"));
    }

    let client = PubMedClient::new(state.config.ncbi_api_key.clone());
    let dates = DateRange {
        mindate: req.mindate.clone(),
        maxdate: req.maxdate.clone(),
    };

    let pmids = client.esearch(&req.query, req.retmax, &dates).await?;
    if pmids.is_empty() {
        return Ok(Json(SearchResponse { records: vec![] }));
    }

    let records = if req.include_abstracts {
        client.fetch_with_abstracts(&pmids).await?
    } else {
        client.esummary(&pmids).await?
    };

    Ok(Json(SearchResponse { records }))
}
