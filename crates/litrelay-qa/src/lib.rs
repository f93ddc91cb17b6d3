//! litrelay-qa — natural-language question → constrained read-only SQL.
//!
//! Pipeline: prompt the model for one SELECT over the articles table,
//! extract the statement from the response, run it through the local safety
//! filter, cap its LIMIT, and execute it. The safety filter is the actual
//! enforcement boundary; the prompt instructions are advisory only.

pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod prompt;

pub use pipeline::{answer_question, QaAnswer};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("LLM error: {0}")]
    Llm(#[from] litrelay_llm::LlmError),

    #[error("generated SQL rejected by safety checks: {0}")]
    Rejected(String),

    #[error("SQL execution error: {0}")]
    Execution(#[from] litrelay_db::DbError),
}

pub type Result<T> = std::result::Result<T, QaError>;
