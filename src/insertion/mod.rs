//! Slash-triggered search and insert
//!
//! Typing `/` opens a candidate list fed by an [`ItemSearchProvider`]. The
//! query is debounced, both provider lists are searched concurrently, and
//! committing an item splices a rendered block over the `/query` span.

mod candidate;
mod controller;
mod debounce;
mod provider;
mod search;
mod session;
pub mod template;

pub use candidate::{rank_candidates, CandidateItem, CardDetails, ItemKind, SourceItem};
pub use controller::{InsertionController, KeyResponse};
pub use debounce::Debouncer;
pub use provider::{ItemSearchProvider, LibraryProvider, ProviderError};
pub use search::CandidateSearch;
pub use session::{
    InputOutcome, Insertion, InsertionSession, InsertionState, KeyOutcome, SearchRequest, SessionPhase,
};
