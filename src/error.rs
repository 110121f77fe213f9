//! Error types for oneonone-insights.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load dataset: {0}")]
    Load(String),

    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("no record with topic: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
