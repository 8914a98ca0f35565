//! Async driver for the insertion session
//!
//! Owns the session, the debounce slot and the search coordinator. All
//! entry points are called from the host's input handler, one at a time.

use super::debounce::Debouncer;
use super::provider::ItemSearchProvider;
use super::search::CandidateSearch;
use super::session::{InputOutcome, Insertion, InsertionSession, InsertionState, KeyOutcome, SearchRequest};
use crate::config::EngineConfig;
use crate::keymap::KeyChord;
use crate::overlay::{compute_anchor, HostGeometry};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// What the host should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResponse {
    /// Let the host handle the key normally
    Ignored,
    /// The list consumed the key
    Handled,
    /// An item was inserted; replace the text and move the caret
    Inserted(Insertion),
}

pub struct InsertionController {
    session: Arc<Mutex<InsertionSession>>,
    search: Arc<CandidateSearch>,
    debouncer: Debouncer,
    config: EngineConfig,
}

impl InsertionController {
    pub fn new(provider: Arc<dyn ItemSearchProvider>, config: EngineConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(InsertionSession::new(config.debounce()))),
            search: Arc::new(CandidateSearch::new(provider, config.max_results)),
            debouncer: Debouncer::new(),
            config,
        }
    }

    /// Feed the current text and caret after every edit.
    pub async fn handle_input(&mut self, text: &str, cursor: usize, geometry: &HostGeometry) -> InsertionState {
        let shared = Arc::clone(&self.session);
        let mut session = shared.lock().await;
        match session.on_input(text, cursor) {
            InputOutcome::Opened(request) => {
                let geometry = self.geometry_defaults(geometry);
                session.set_anchor(compute_anchor(&geometry, text, cursor, self.config.overlay_margin));
                self.dispatch(request);
            }
            InputOutcome::Updated(request) => self.dispatch(request),
            InputOutcome::Closed => {
                self.debouncer.cancel();
            }
            InputOutcome::Unchanged => {}
        }
        session.state().clone()
    }

    /// Route a navigation key to the open list.
    ///
    /// Chords carrying modifiers always go back to the host.
    pub async fn handle_key(&mut self, chord: KeyChord, text: &str, cursor: usize) -> KeyResponse {
        if !chord.is_navigation() {
            return KeyResponse::Ignored;
        }
        let mut session = self.session.lock().await;
        match session.on_key(chord.key) {
            KeyOutcome::Ignored => KeyResponse::Ignored,
            KeyOutcome::Consumed => KeyResponse::Handled,
            KeyOutcome::Closed => {
                self.debouncer.cancel();
                KeyResponse::Handled
            }
            KeyOutcome::Commit(index) => match session.commit(index, text, cursor) {
                Some(insertion) => {
                    self.debouncer.cancel();
                    KeyResponse::Inserted(insertion)
                }
                None => KeyResponse::Handled,
            },
        }
    }

    /// Commit the item at `index`, as when it is clicked.
    pub async fn select(&mut self, index: usize, text: &str, cursor: usize) -> Option<Insertion> {
        let insertion = self.session.lock().await.commit(index, text, cursor)?;
        self.debouncer.cancel();
        Some(insertion)
    }

    /// Close the session without inserting anything.
    pub async fn cancel(&mut self) {
        self.debouncer.cancel();
        self.session.lock().await.close();
    }

    pub async fn state(&self) -> InsertionState {
        self.session.lock().await.state().clone()
    }

    pub async fn is_open(&self) -> bool {
        self.session.lock().await.is_open()
    }

    /// Wait until the pending search, if any, has been applied.
    pub async fn settle(&mut self) {
        self.debouncer.flush().await;
    }

    fn dispatch(&mut self, request: SearchRequest) {
        let session = Arc::clone(&self.session);
        let search = Arc::clone(&self.search);
        let delay = request.delay;
        self.debouncer.schedule(delay, async move {
            let items = search.run(&request.query).await;
            debug!(request = request.id, query = %request.query, results = items.len(), "search resolved");
            session.lock().await.apply_results(request.id, items);
        });
    }

    /// Fill in what a plain text host left unmeasured from the configuration.
    fn geometry_defaults(&self, geometry: &HostGeometry) -> HostGeometry {
        match geometry {
            HostGeometry::PlainText {
                bounds,
                line_height,
                font_size,
            } => HostGeometry::PlainText {
                bounds: *bounds,
                line_height: line_height.or(self.config.line_height),
                font_size: font_size.or(Some(self.config.font_size)),
            },
            other => other.clone(),
        }
    }
}
