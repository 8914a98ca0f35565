//! Persistence sink trait and save types

use crate::document::DocumentId;
use crate::formatting::FormattingData;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while persisting a document
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date parsing error: {0}")]
    DateParse(String),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// The text plus formatting payload handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub formatting: FormattingData,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(id: DocumentId, text: impl Into<String>, formatting: FormattingData) -> Self {
        Self {
            id,
            text: text.into(),
            formatting,
            updated_at: Utc::now(),
        }
    }
}

/// Save status the host displays next to the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Saved,
    Saving,
    Error,
}

impl std::fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved => write!(f, "saved"),
            Self::Saving => write!(f, "saving"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Accepts document snapshots for durable storage.
///
/// Implementations must be thread-safe (Send + Sync); the engine does not
/// retry and only reports the outcome as a [`SaveStatus`].
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn save(&self, record: &DocumentRecord) -> SinkResult<()>;
}
