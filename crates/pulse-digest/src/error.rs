use chrono::{DateTime, Utc};
use thiserror::Error;

use pulse_persist::PersistError;
use pulse_relevance::RelevanceError;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("No messages found for project '{project}' between {start} and {end}")]
    NoMessagesFound {
        project: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Guard rail: carries the computed estimate so the caller can widen
    /// the budget or shrink the window.
    #[error("Estimated cost ${estimated:.2} exceeds limit ${limit:.2}")]
    CostLimitExceeded { estimated: f64, limit: f64 },

    /// Completion-collaborator failure, surfaced verbatim. No retry here;
    /// callers own retry policy.
    #[error("Summary generation failed: {0}")]
    GenerationFailed(anyhow::Error),

    #[error("Relevance analysis failed: {0}")]
    Relevance(#[from] RelevanceError),

    #[error("Persistence failed: {0}")]
    Persist(#[from] PersistError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;
