//! litrelay-llm — Google Gemini client for text generation.
//!
//! Two operations are used by the relay:
//!   generateContent — turn a prompt into text (SQL drafting)
//!   models listing  — enumerate model ids that support generateContent

pub mod gemini;

pub use gemini::GeminiClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("prompt blocked by model safety filter: {0}")]
    Blocked(String),

    #[error("model returned no text content")]
    NoContent,
}

pub type Result<T> = std::result::Result<T, LlmError>;
