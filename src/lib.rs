//! Cardflow: Text Annotation and Card Insertion Engine
//!
//! Maintains offset-based formatting over plain text, renders it into styled
//! segments, keeps the caret stable across re-renders, and drives the
//! slash-triggered search that splices evidence cards and notes into the text.
//!
//! # Core Concepts
//!
//! - **Ranges**: half-open `[start, end)` intervals over UTF-16 offsets carrying
//!   emphasis, highlight or minimize intent
//! - **Segments**: maximal runs of text with one resolved style combination
//! - **Insertion sessions**: the transient state of a `/query` search
//!
//! # Example
//!
//! ```
//! use cardflow::{segment, FormattingData, RangePayload};
//!
//! let text = "Tariffs raise prices";
//! let formatting = FormattingData::new().with_range(
//!     20,
//!     8,
//!     13,
//!     RangePayload::Emphasis { font: "Calibri".into(), size: 13.0 },
//! );
//! let segments = segment(text, &formatting);
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[1].text, "raise");
//! ```

pub mod config;
pub mod cursor;
mod document;
pub mod formatting;
pub mod insertion;
pub mod keymap;
pub mod overlay;
pub mod persistence;
mod segment;
pub mod text;

pub use config::{ConfigError, EngineConfig};
pub use cursor::{capture_offset, restore_offset, OffsetRange, RunTree, Selection, TextTree, TreePoint};
pub use document::{CommandOutcome, Document, DocumentId};
pub use formatting::{
    minimized_complement, FormattingData, HighlightColor, RangeKind, RangePayload,
};
pub use insertion::{
    CandidateItem, InsertionController, InsertionSession, InsertionState, ItemKind, ItemSearchProvider,
    KeyResponse, LibraryProvider, ProviderError, SourceItem,
};
pub use keymap::{EditorCommand, Key, KeyChord, Modifiers};
pub use overlay::{compute_anchor, Anchor, HostGeometry, Rect};
pub use persistence::{DocumentRecord, MemorySink, PersistenceSink, SaveStatus, SinkError, SqliteSink};
pub use segment::{join, resolve_style, segment, EmphasisFace, Segment, SegmentStyle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
