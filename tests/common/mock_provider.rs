//! Deterministic search provider for insertion tests
//!
//! Filters fixed card and note lists by substring, records every query it
//! receives, and can be scripted to fail or to answer slowly.

use async_trait::async_trait;
use cardflow::{ItemSearchProvider, ProviderError, SourceItem};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct ScriptedProvider {
    cards: Vec<SourceItem>,
    notes: Vec<SourceItem>,
    fail_cards: bool,
    fail_notes: bool,
    latency: Duration,
    queries: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(cards: Vec<SourceItem>, notes: Vec<SourceItem>) -> Self {
        Self {
            cards,
            notes,
            ..Default::default()
        }
    }

    pub fn failing_cards(mut self) -> Self {
        self.fail_cards = true;
        self
    }

    pub fn failing_notes(mut self) -> Self {
        self.fail_notes = true;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queries seen by `search_cards`, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    async fn answer(&self, items: &[SourceItem], fail: bool, query: &str) -> Result<Vec<SourceItem>, ProviderError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if fail {
            return Err(ProviderError::Unavailable("scripted failure".to_string()));
        }
        let needle = query.to_lowercase();
        Ok(items
            .iter()
            .filter(|item| item.haystack().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ItemSearchProvider for ScriptedProvider {
    async fn search_cards(&self, query: &str) -> Result<Vec<SourceItem>, ProviderError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.answer(&self.cards, self.fail_cards, query).await
    }

    async fn search_notes(&self, query: &str) -> Result<Vec<SourceItem>, ProviderError> {
        self.answer(&self.notes, self.fail_notes, query).await
    }
}
