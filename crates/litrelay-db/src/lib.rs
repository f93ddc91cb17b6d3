//! litrelay-db — SQLite persistence for article records.
//!
//! One connection is opened and released per call; saves run inside a
//! single transaction so a batch either lands completely or not at all.

pub mod store;

pub use store::{run_select, save_records};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
