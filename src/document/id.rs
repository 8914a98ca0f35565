//! Document identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for name-derived document ids
const DOCUMENT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_9b3d_4c8a_a0e1_57d2_c3b4_9f10);

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Create a new random DocumentId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Stable id for a human-readable document name
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&DOCUMENT_NAMESPACE, name.as_bytes()))
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
