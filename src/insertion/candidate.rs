//! Candidate items offered by the insertion list

use serde::{Deserialize, Serialize};

/// Which provider list an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Evidence cards
    Card,
    /// Free-form analytic notes
    Analytics,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Analytics => write!(f, "analytics"),
        }
    }
}

/// Structured fields of an evidence card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub tag: String,
    pub author: String,
    pub year: String,
    pub publication: Option<String>,
    pub qualifications: Option<String>,
    pub methodology: Option<String>,
    pub evidence: String,
}

/// An item as returned by a search provider, before it is tagged with a kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub searchable_text: String,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

impl SourceItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        let content = content.into();
        Self {
            id: id.into(),
            searchable_text: format!("{} {}", title, content),
            title,
            content,
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_searchable_text(mut self, text: impl Into<String>) -> Self {
        self.searchable_text = text.into();
        self
    }

    pub fn with_card(mut self, card: CardDetails) -> Self {
        self.card = Some(card);
        self
    }

    /// Text matched against queries; falls back to title and content.
    pub fn haystack(&self) -> String {
        if self.searchable_text.is_empty() {
            format!("{} {}", self.title, self.content)
        } else {
            self.searchable_text.clone()
        }
    }
}

/// A searchable unit offered for insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub searchable_text: String,
    pub card: Option<CardDetails>,
}

impl CandidateItem {
    pub fn from_source(kind: ItemKind, item: SourceItem) -> Self {
        let searchable_text = item.haystack();
        Self {
            id: item.id,
            kind,
            title: item.title,
            summary: item.summary,
            content: item.content,
            searchable_text,
            card: item.card,
        }
    }

    /// Case-insensitive substring match against the searchable text.
    pub fn matches(&self, query: &str) -> bool {
        self.searchable_text
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// Order candidates for display and keep at most `max` of them.
///
/// Items whose searchable text contains `query` come first. The sort is
/// stable, so items of equal relevance keep their input order.
pub fn rank_candidates(mut items: Vec<CandidateItem>, query: &str, max: usize) -> Vec<CandidateItem> {
    let needle = query.to_lowercase();
    items.sort_by_key(|item| !item.searchable_text.to_lowercase().contains(&needle));
    items.truncate(max);
    items
}
