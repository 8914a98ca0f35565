//! Item search provider: the external source of candidate items

use super::candidate::SourceItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from a search provider. The engine degrades all of them to an
/// empty result list.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("search request failed: {0}")]
    Request(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("library parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Source of card-like and note-like items for a query.
///
/// Abstracts over transport so the insertion engine does not care whether
/// items come from a database, an HTTP API or a fixture.
#[async_trait]
pub trait ItemSearchProvider: Send + Sync {
    /// Search evidence cards
    async fn search_cards(&self, query: &str) -> Result<Vec<SourceItem>, ProviderError>;

    /// Search analytic notes
    async fn search_notes(&self, query: &str) -> Result<Vec<SourceItem>, ProviderError>;
}

/// Items held in memory, loaded from a YAML or JSON library file.
///
/// ```yaml
/// cards:
///   - id: c1
///     title: Tariffs
///     searchableText: tariffs raise prices
/// notes: []
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryProvider {
    #[serde(default)]
    cards: Vec<SourceItem>,
    #[serde(default)]
    notes: Vec<SourceItem>,
}

impl LibraryProvider {
    pub fn new(cards: Vec<SourceItem>, notes: Vec<SourceItem>) -> Self {
        Self { cards, notes }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ProviderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a library file. JSON parses too, being valid YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    fn filter(items: &[SourceItem], query: &str) -> Vec<SourceItem> {
        let needle = query.to_lowercase();
        items
            .iter()
            .filter(|item| needle.is_empty() || item.haystack().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemSearchProvider for LibraryProvider {
    async fn search_cards(&self, query: &str) -> Result<Vec<SourceItem>, ProviderError> {
        Ok(Self::filter(&self.cards, query))
    }

    async fn search_notes(&self, query: &str) -> Result<Vec<SourceItem>, ProviderError> {
        Ok(Self::filter(&self.notes, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
cards:
  - id: c1
    title: Tariffs
    searchableText: Tariffs raise consumer prices
    card:
      tag: Tariffs raise prices
      author: Amiti
      year: "19"
      evidence: Import prices rose in full.
notes:
  - id: n1
    title: Perm
    content: Do both
"#;

    #[tokio::test]
    async fn library_filters_case_insensitively() {
        let library = LibraryProvider::from_yaml_str(LIBRARY).unwrap();
        assert_eq!(library.card_count(), 1);

        let cards = library.search_cards("CONSUMER").await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].card.as_ref().unwrap().author, "Amiti");

        let notes = library.search_notes("consumer").await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn empty_query_returns_all() {
        let library = LibraryProvider::from_yaml_str(LIBRARY).unwrap();
        assert_eq!(library.search_cards("").await.unwrap().len(), 1);
        // falls back to title + content when searchableText is absent
        assert_eq!(library.search_notes("both").await.unwrap().len(), 1);
    }

    #[test]
    fn json_library_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{"notes":[{"id":"n","title":"t","content":"c"}]}"#).unwrap();

        let library = LibraryProvider::load(&path).unwrap();
        assert_eq!(library.card_count(), 0);
        assert_eq!(library.note_count(), 1);

        let notes = tokio_test::block_on(library.search_notes("C")).unwrap();
        assert_eq!(notes[0].id, "n");
    }

    #[test]
    fn malformed_library_is_an_error() {
        let err = LibraryProvider::from_yaml_str("cards: 7").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
