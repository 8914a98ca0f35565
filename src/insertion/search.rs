//! Merged, ranked search across both provider lists

use super::candidate::{rank_candidates, CandidateItem, ItemKind, SourceItem};
use super::provider::{ItemSearchProvider, ProviderError};
use std::sync::Arc;
use tracing::warn;

/// Runs one query against both provider lists and merges the results.
#[derive(Clone)]
pub struct CandidateSearch {
    provider: Arc<dyn ItemSearchProvider>,
    max_results: usize,
}

impl CandidateSearch {
    pub fn new(provider: Arc<dyn ItemSearchProvider>, max_results: usize) -> Self {
        Self {
            provider,
            max_results,
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Query cards and notes concurrently, tag, merge and rank.
    ///
    /// A failing list contributes nothing; the other list is still shown.
    pub async fn run(&self, query: &str) -> Vec<CandidateItem> {
        let (cards, notes) = tokio::join!(
            self.provider.search_cards(query),
            self.provider.search_notes(query)
        );

        let merged: Vec<CandidateItem> = settle(ItemKind::Card, query, cards)
            .chain(settle(ItemKind::Analytics, query, notes))
            .collect();
        rank_candidates(merged, query, self.max_results)
    }
}

fn settle(
    kind: ItemKind,
    query: &str,
    result: Result<Vec<SourceItem>, ProviderError>,
) -> impl Iterator<Item = CandidateItem> {
    let items = result.unwrap_or_else(|e| {
        warn!(%kind, query, error = %e, "search provider failed; treating as no results");
        Vec::new()
    });
    items
        .into_iter()
        .map(move |item| CandidateItem::from_source(kind, item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Scripted {
        cards: Result<Vec<SourceItem>, String>,
        notes: Result<Vec<SourceItem>, String>,
    }

    #[async_trait]
    impl ItemSearchProvider for Scripted {
        async fn search_cards(&self, _query: &str) -> Result<Vec<SourceItem>, ProviderError> {
            self.cards.clone().map_err(ProviderError::Request)
        }

        async fn search_notes(&self, _query: &str) -> Result<Vec<SourceItem>, ProviderError> {
            self.notes.clone().map_err(ProviderError::Unavailable)
        }
    }

    fn item(id: &str, text: &str) -> SourceItem {
        SourceItem::new(id, id, "").with_searchable_text(text)
    }

    #[tokio::test]
    async fn cards_precede_notes_at_equal_relevance() {
        let provider = Scripted {
            cards: Ok(vec![item("c1", "alpha")]),
            notes: Ok(vec![item("n1", "beta")]),
        };
        let results = CandidateSearch::new(Arc::new(provider), 10).run("").await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].kind, ItemKind::Card);
        assert_eq!(results[1].kind, ItemKind::Analytics);
    }

    #[tokio::test]
    async fn relevant_note_outranks_irrelevant_card() {
        let provider = Scripted {
            cards: Ok(vec![item("c1", "alpha")]),
            notes: Ok(vec![item("n1", "beta")]),
        };
        let results = CandidateSearch::new(Arc::new(provider), 10).run("BETA").await;
        assert_eq!(results[0].id, "n1");
    }

    #[tokio::test]
    async fn failing_list_degrades_to_empty() {
        let provider = Scripted {
            cards: Err("timeout".to_string()),
            notes: Ok(vec![item("n1", "beta")]),
        };
        let results = CandidateSearch::new(Arc::new(provider), 10).run("").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "n1");
    }

    #[tokio::test]
    async fn both_lists_failing_is_empty_not_error() {
        let provider = Scripted {
            cards: Err("down".to_string()),
            notes: Err("down".to_string()),
        };
        assert!(CandidateSearch::new(Arc::new(provider), 10).run("x").await.is_empty());
    }

    #[tokio::test]
    async fn results_are_truncated() {
        let provider = Scripted {
            cards: Ok((0..8).map(|i| item(&format!("c{}", i), "x")).collect()),
            notes: Ok((0..8).map(|i| item(&format!("n{}", i), "x")).collect()),
        };
        let results = CandidateSearch::new(Arc::new(provider), 10).run("").await;
        assert_eq!(results.len(), 10);
        assert_eq!(results[9].id, "n1");
    }
}
