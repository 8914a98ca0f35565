//! Document: one open text with its formatting and save status
//!
//! The text buffer is the single source of truth. Formatting is metadata
//! over it and is discarded wholesale whenever the text itself changes;
//! ranges are never repaired incrementally.

mod id;

pub use id::DocumentId;

use crate::config::EngineConfig;
use crate::cursor::{capture_offset, OffsetRange, RunTree, Selection, TextTree};
use crate::formatting::{FormattingData, HighlightColor, RangePayload};
use crate::insertion::Insertion;
use crate::keymap::EditorCommand;
use crate::persistence::{DocumentRecord, PersistenceSink, SaveStatus, SinkResult};
use crate::segment::{segment, Segment};
use crate::text;
use tracing::{debug, info, warn};

/// What the host should do after a formatting command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Formatting changed. Re-render, then restore the caret to `restore`.
    Applied { restore: Option<OffsetRange> },
    /// Show the color choice, then call [`Document::highlight`] with this span.
    ChooseHighlight(OffsetRange),
    /// Nothing changed
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    text: String,
    formatting: FormattingData,
    save_status: SaveStatus,
    config: EngineConfig,
}

impl Document {
    /// A new document with empty formatting
    pub fn new(text: impl Into<String>, config: EngineConfig) -> Self {
        Self::with_id(DocumentId::new(), text, config)
    }

    pub fn with_id(id: DocumentId, text: impl Into<String>, config: EngineConfig) -> Self {
        Self {
            id,
            text: text.into(),
            formatting: FormattingData::new(),
            save_status: SaveStatus::Saved,
            config,
        }
    }

    /// Reopen a stored document, dropping ranges that no longer fit its text.
    pub fn open(record: DocumentRecord, config: EngineConfig) -> Self {
        let len = text::utf16_len(&record.text);
        let formatting = record.formatting.sanitized(len);
        if formatting.range_count() != record.formatting.range_count() {
            warn!(
                document = %record.id,
                dropped = record.formatting.range_count() - formatting.range_count(),
                "stored formatting had ranges outside the text"
            );
        }
        Self {
            id: record.id,
            text: record.text,
            formatting,
            save_status: SaveStatus::Saved,
            config,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        text::utf16_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn formatting(&self) -> &FormattingData {
        &self.formatting
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the text after a direct edit. Formatting is reset if the text changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        if !self.formatting.is_empty() {
            debug!(document = %self.id, "text edited; formatting reset");
            self.formatting.clear();
        }
        true
    }

    /// Apply a range over `span`. Invalid spans are ignored.
    pub fn apply(&mut self, span: OffsetRange, payload: RangePayload) -> bool {
        let len = self.len();
        self.formatting
            .apply_range(len, span.start as i64, span.end as i64, payload)
    }

    pub fn emphasize(&mut self, span: OffsetRange) -> bool {
        let payload = RangePayload::Emphasis {
            font: self.config.emphasis_font.clone(),
            size: self.config.emphasis_size,
        };
        self.apply(span, payload)
    }

    pub fn highlight(&mut self, span: OffsetRange, color: HighlightColor) -> bool {
        self.apply(span, RangePayload::Highlight(color))
    }

    /// Shrink everything outside the emphasized spans.
    pub fn minimize_non_emphasized(&mut self) -> bool {
        let len = self.len();
        self.formatting
            .minimize_non_emphasized(len, self.config.minimize_size)
    }

    pub fn clear_formatting(&mut self) {
        self.formatting.clear();
    }

    /// Current display segments
    pub fn segments(&self) -> Vec<Segment> {
        segment(&self.text, &self.formatting)
    }

    /// Render the segments as a run tree
    pub fn render(&self) -> RunTree {
        RunTree::from_segments(&self.segments())
    }

    /// Run a keyboard formatting command against the host selection.
    ///
    /// Selection-based commands need a selection inside `tree`; without one
    /// they are skipped. Document-wide commands run regardless and hand back
    /// the captured caret when there is one.
    pub fn execute<T: TextTree>(
        &mut self,
        command: EditorCommand,
        selection: Option<&Selection<T::Node>>,
        tree: &T,
    ) -> CommandOutcome {
        let captured = selection.and_then(|s| capture_offset(s, tree));
        match command {
            EditorCommand::Emphasize => match captured {
                Some(span) if self.emphasize(span) => CommandOutcome::Applied {
                    restore: Some(span),
                },
                _ => CommandOutcome::Skipped,
            },
            EditorCommand::ChooseHighlight => match captured {
                Some(span) if !span.is_empty() => CommandOutcome::ChooseHighlight(span),
                _ => CommandOutcome::Skipped,
            },
            EditorCommand::MinimizeNonEmphasized => {
                if self.minimize_non_emphasized() {
                    CommandOutcome::Applied { restore: captured }
                } else {
                    CommandOutcome::Skipped
                }
            }
            EditorCommand::ClearFormatting => {
                if self.formatting.is_empty() {
                    return CommandOutcome::Skipped;
                }
                self.clear_formatting();
                CommandOutcome::Applied { restore: captured }
            }
        }
    }

    /// Take the result of an insertion commit. Returns the new caret offset.
    pub fn apply_insertion(&mut self, insertion: &Insertion) -> usize {
        self.set_text(insertion.text.clone());
        insertion.caret
    }

    /// Snapshot for the persistence sink
    pub fn record(&self) -> DocumentRecord {
        DocumentRecord::new(self.id, self.text.clone(), self.formatting.clone())
    }

    /// Mark a save as in flight and take the snapshot to write.
    ///
    /// Hosts that drive the sink themselves call this, release the document,
    /// then report back through [`finish_save`](Self::finish_save).
    pub fn begin_save(&mut self) -> DocumentRecord {
        self.save_status = SaveStatus::Saving;
        self.record()
    }

    /// Record the outcome of a save started with [`begin_save`](Self::begin_save).
    pub fn finish_save(&mut self, result: SinkResult<()>) -> SinkResult<()> {
        match result {
            Ok(()) => {
                self.save_status = SaveStatus::Saved;
                info!(document = %self.id, ranges = self.formatting.range_count(), "document saved");
                Ok(())
            }
            Err(e) => {
                self.save_status = SaveStatus::Error;
                warn!(document = %self.id, error = %e, "document save failed");
                Err(e)
            }
        }
    }

    /// Hand the current snapshot to `sink`, tracking the save status.
    ///
    /// Dropping the returned future before it resolves leaves the status at
    /// [`SaveStatus::Error`]: the snapshot was not confirmed written.
    pub async fn save(&mut self, sink: &dyn PersistenceSink) -> SinkResult<()> {
        let record = self.begin_save();
        let pending = PendingSave {
            status: &mut self.save_status,
            document: self.id,
        };
        let result = sink.save(&record).await;
        pending.complete();
        self.finish_save(result)
    }
}

/// Resets an in-flight status if its save future is dropped.
struct PendingSave<'a> {
    status: &'a mut SaveStatus,
    document: DocumentId,
}

impl PendingSave<'_> {
    fn complete(self) {
        std::mem::forget(self);
    }
}

impl Drop for PendingSave<'_> {
    fn drop(&mut self) {
        if *self.status == SaveStatus::Saving {
            warn!(document = %self.document, "save abandoned before the sink answered");
            *self.status = SaveStatus::Error;
        }
    }
}
