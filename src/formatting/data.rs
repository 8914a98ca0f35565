//! FormattingData: the per-document annotation aggregate

use super::minimize::minimized_complement;
use super::range::{
    validate_bounds, EmphasisRange, EmphasisStyle, HighlightRange, MinimizedRange, RangeError,
    RangePayload, Span,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Formatting metadata over a single plain-text buffer.
///
/// Always three independent lists. Ranges are appended in the order they are
/// applied and are never merged, sorted or de-duplicated; overlapping ranges
/// of one kind resolve by first match during segmentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattingData {
    #[serde(default)]
    pub emphasis: Vec<EmphasisRange>,
    #[serde(default)]
    pub highlights: Vec<HighlightRange>,
    #[serde(default)]
    pub minimized: Vec<MinimizedRange>,
}

impl FormattingData {
    /// The canonical empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored payload. `null` is treated as empty data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: Option<Self> = serde_json::from_str(json)?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_empty(&self) -> bool {
        self.emphasis.is_empty() && self.highlights.is_empty() && self.minimized.is_empty()
    }

    /// Total number of ranges across all three lists
    pub fn range_count(&self) -> usize {
        self.emphasis.len() + self.highlights.len() + self.minimized.len()
    }

    /// Append a range after validating it against the text length.
    pub fn try_apply(
        &mut self,
        text_len: usize,
        start: i64,
        end: i64,
        payload: RangePayload,
    ) -> Result<(), RangeError> {
        let (start, end) = validate_bounds(start, end, text_len)?;
        match payload {
            RangePayload::Emphasis { font, size } => self.emphasis.push(EmphasisRange {
                start,
                end,
                style: EmphasisStyle::BoldUnderline,
                font,
                size,
            }),
            RangePayload::Highlight(color) => {
                self.highlights.push(HighlightRange { start, end, color })
            }
            RangePayload::Minimize { size } => {
                self.minimized.push(MinimizedRange { start, end, size })
            }
        }
        Ok(())
    }

    /// Append a range, silently ignoring invalid bounds.
    ///
    /// Returns `true` if the range was stored.
    pub fn apply_range(&mut self, text_len: usize, start: i64, end: i64, payload: RangePayload) -> bool {
        let kind = payload.kind();
        match self.try_apply(text_len, start, end, payload) {
            Ok(()) => true,
            Err(e) => {
                debug!(%kind, error = %e, "range rejected");
                false
            }
        }
    }

    /// Builder form of [`apply_range`](Self::apply_range).
    pub fn with_range(mut self, text_len: usize, start: i64, end: i64, payload: RangePayload) -> Self {
        self.apply_range(text_len, start, end, payload);
        self
    }

    /// Drop every range.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Replace the minimized list with the complement of the emphasis ranges.
    ///
    /// A no-op when there is no emphasis. Returns `true` if the list was replaced.
    pub fn minimize_non_emphasized(&mut self, text_len: usize, size: f32) -> bool {
        if self.emphasis.is_empty() {
            debug!("minimize skipped: no emphasis ranges");
            return false;
        }
        self.minimized = minimized_complement(&self.emphasis, text_len, size, &self.minimized);
        true
    }

    /// A copy holding only the ranges valid for a text of `text_len` units.
    ///
    /// Stored payloads can outlive the text they were written against.
    pub fn sanitized(&self, text_len: usize) -> Self {
        fn keep<T: Span + Clone>(ranges: &[T], text_len: usize) -> Vec<T> {
            ranges
                .iter()
                .filter(|r| r.start() < r.end() && r.end() <= text_len)
                .cloned()
                .collect()
        }
        Self {
            emphasis: keep(&self.emphasis, text_len),
            highlights: keep(&self.highlights, text_len),
            minimized: keep(&self.minimized, text_len),
        }
    }

    /// Every range boundary across the three lists, unsorted.
    pub(crate) fn boundaries(&self) -> impl Iterator<Item = usize> + '_ {
        fn ends<T: Span>(ranges: &[T]) -> impl Iterator<Item = usize> + '_ {
            ranges.iter().flat_map(|r| [r.start(), r.end()])
        }
        ends(&self.emphasis)
            .chain(ends(&self.highlights))
            .chain(ends(&self.minimized))
    }
}
