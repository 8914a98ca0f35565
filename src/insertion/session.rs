//! The slash-triggered insertion state machine
//!
//! `Idle → Triggered → Open → Idle`. Typing `/` opens a session; the text
//! between the slash and the caret is the query. The machine itself is
//! synchronous: it returns [`SearchRequest`]s for the caller to execute and
//! accepts their results through [`InsertionSession::apply_results`].

use super::candidate::CandidateItem;
use super::template;
use crate::keymap::Key;
use crate::overlay::Anchor;
use crate::text;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Slash seen, first results pending
    Triggered,
    /// Results shown
    Open,
}

/// Observable state of the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionState {
    pub trigger_offset: usize,
    pub query: String,
    pub items: Vec<CandidateItem>,
    pub selected_index: usize,
    pub loading: bool,
    pub open: bool,
    pub anchor: Option<Anchor>,
}

impl InsertionState {
    pub fn selected(&self) -> Option<&CandidateItem> {
        self.items.get(self.selected_index)
    }
}

/// A search the caller should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Monotonic; only the latest request's results are accepted
    pub id: u64,
    pub query: String,
    /// Zero for an empty query, the debounce delay otherwise
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing to do
    Unchanged,
    /// A session just opened
    Opened(SearchRequest),
    /// The query changed
    Updated(SearchRequest),
    /// The session was abandoned
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not for us; the host should handle the key
    Ignored,
    /// Consumed without further effect
    Consumed,
    /// Commit the item at this index
    Commit(usize),
    /// Escape closed the session
    Closed,
}

/// Result of committing an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// The full text after the splice
    pub text: String,
    /// Caret offset just past the inserted block
    pub caret: usize,
    /// The block that was inserted
    pub block: String,
    pub item_id: String,
}

/// One insertion session per open document.
#[derive(Debug)]
pub struct InsertionSession {
    state: InsertionState,
    phase: SessionPhase,
    debounce: Duration,
    last_request: u64,
}

impl InsertionSession {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: InsertionState::default(),
            phase: SessionPhase::Idle,
            debounce,
            last_request: 0,
        }
    }

    pub fn state(&self) -> &InsertionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        if self.state.open {
            self.state.anchor = Some(anchor);
        }
    }

    /// React to a text change. `cursor` is the caret's UTF-16 offset.
    pub fn on_input(&mut self, text: &str, cursor: usize) -> InputOutcome {
        if !self.state.open {
            return self.try_open(text, cursor);
        }

        let trigger = self.state.trigger_offset;
        if cursor <= trigger || text::slice(text, trigger, trigger + 1) != "/" {
            debug!(trigger, cursor, "trigger slash gone; closing insertion session");
            self.close();
            return InputOutcome::Closed;
        }

        let query = text::slice(text, trigger + 1, cursor);
        if query.contains(' ') || query.contains('\n') {
            debug!(query, "query left command token; closing insertion session");
            self.close();
            return InputOutcome::Closed;
        }
        if query == self.state.query {
            return InputOutcome::Unchanged;
        }

        self.state.query = query.to_string();
        self.state.loading = true;
        InputOutcome::Updated(self.next_request())
    }

    fn try_open(&mut self, text: &str, cursor: usize) -> InputOutcome {
        if cursor == 0 || text::char_before(text, cursor) != Some('/') {
            return InputOutcome::Unchanged;
        }
        self.state = InsertionState {
            trigger_offset: cursor - 1,
            loading: true,
            open: true,
            ..InsertionState::default()
        };
        self.phase = SessionPhase::Triggered;
        debug!(trigger = cursor - 1, "insertion session opened");
        InputOutcome::Opened(self.next_request())
    }

    fn next_request(&mut self) -> SearchRequest {
        self.last_request += 1;
        let delay = if self.state.query.is_empty() {
            Duration::ZERO
        } else {
            self.debounce
        };
        SearchRequest {
            id: self.last_request,
            query: self.state.query.clone(),
            delay,
        }
    }

    /// Accept results for `request_id`. Stale or late results are dropped.
    pub fn apply_results(&mut self, request_id: u64, items: Vec<CandidateItem>) -> bool {
        if !self.state.open || request_id != self.last_request {
            debug!(request_id, latest = self.last_request, "discarding stale search results");
            return false;
        }
        self.state.items = items;
        self.state.selected_index = 0;
        self.state.loading = false;
        self.phase = SessionPhase::Open;
        true
    }

    /// Handle a navigation key while the list is showing.
    pub fn on_key(&mut self, key: Key) -> KeyOutcome {
        if !self.state.open {
            return KeyOutcome::Ignored;
        }
        let count = self.state.items.len();
        match key {
            Key::ArrowDown => {
                if count > 0 {
                    self.state.selected_index = (self.state.selected_index + 1).min(count - 1);
                }
                KeyOutcome::Consumed
            }
            Key::ArrowUp => {
                self.state.selected_index = self.state.selected_index.saturating_sub(1);
                KeyOutcome::Consumed
            }
            Key::Enter if count > 0 => KeyOutcome::Commit(self.state.selected_index),
            Key::Enter => KeyOutcome::Consumed,
            Key::Escape => {
                self.close();
                KeyOutcome::Closed
            }
            Key::Char(_) | Key::Other => KeyOutcome::Ignored,
        }
    }

    /// Splice the item at `index` over `[trigger_offset, cursor)` and close.
    pub fn commit(&mut self, index: usize, text: &str, cursor: usize) -> Option<Insertion> {
        if !self.state.open {
            return None;
        }
        let item = self.state.items.get(index)?;
        let block = template::render(item);
        let start = self.state.trigger_offset;
        let insertion = Insertion {
            text: text::splice(text, start, cursor.max(start), &block),
            caret: start + text::utf16_len(&block),
            item_id: item.id.clone(),
            block,
        };
        debug!(item = %insertion.item_id, kind = %item.kind, "inserted item");
        self.close();
        Some(insertion)
    }

    /// Return to idle, discarding all session state.
    pub fn close(&mut self) {
        self.state = InsertionState::default();
        self.phase = SessionPhase::Idle;
    }
}
