//! Common test utilities for cardflow integration tests
//!
//! Scripted providers and sinks that stand in for the host's search
//! backend and storage, plus small fixture builders.

#![allow(dead_code)]

pub mod mock_provider;
pub mod sinks;

pub use mock_provider::ScriptedProvider;
pub use sinks::{FlakySink, RecordingSink};

use cardflow::insertion::CardDetails;
use cardflow::{HostGeometry, Rect, SourceItem};

/// A fully populated evidence card.
pub fn card(id: &str, tag: &str, author: &str) -> SourceItem {
    SourceItem::new(id, tag, "").with_card(CardDetails {
        tag: tag.to_string(),
        author: author.to_string(),
        year: "24".to_string(),
        publication: Some("Foreign Affairs".to_string()),
        qualifications: None,
        methodology: None,
        evidence: format!("{} evidence body", tag),
    })
}

/// An analytic note whose inserted block is its content.
pub fn note(id: &str, content: &str) -> SourceItem {
    SourceItem::new(id, id, content)
}

/// A plain text host at (100, 20) with no measured line height.
pub fn plain_geometry() -> HostGeometry {
    HostGeometry::PlainText {
        bounds: Rect::new(100.0, 20.0, 400.0, 300.0),
        line_height: None,
        font_size: Some(14.0),
    }
}
