//! Environment-sourced configuration, resolved once at startup and passed
//! into components as values.

use std::net::SocketAddr;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// NCBI E-utilities key; raises the courtesy call rate when present.
    pub ncbi_api_key: Option<String>,
    /// Gemini credential (`GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`).
    pub gemini_api_key: Option<String>,
    /// Default generation model; overridable per QA request.
    pub gemini_model: String,
    /// SQLite location for the articles table.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = non_empty("LITRELAY_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()?;

        Ok(Self {
            ncbi_api_key: non_empty("NCBI_EUTILS_API_KEY"),
            gemini_api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY")),
            gemini_model: non_empty("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            database_url: non_empty("DATABASE_URL"),
            bind_addr,
        })
    }
}
