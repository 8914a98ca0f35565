//! Segmentation: turning formatting ranges into renderable text runs
//!
//! A sweep over the sorted set of range boundaries. Each consecutive pair of
//! boundaries is one candidate segment; its styles are resolved by probing
//! the midpoint against each range list independently.

mod style;

pub use style::{EmphasisFace, SegmentStyle};

use crate::formatting::{FormattingData, Span};
use crate::text;
use serde::Serialize;

/// A maximal run of text with one resolved style combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
    /// UTF-16 offset where the run starts
    pub start: usize,
    /// UTF-16 offset where the run ends (exclusive)
    pub end: usize,
}

impl Segment {
    pub fn is_plain(&self) -> bool {
        self.style.is_plain()
    }
}

/// Split `text` into ordered, gap-free segments according to `formatting`.
///
/// Empty text yields no segments; text without ranges yields exactly one
/// plain segment.
pub fn segment(text: &str, formatting: &FormattingData) -> Vec<Segment> {
    let len = text::utf16_len(text);
    if len == 0 {
        return Vec::new();
    }

    let mut points: Vec<usize> = Vec::with_capacity(formatting.range_count() * 2 + 2);
    points.push(0);
    points.push(len);
    points.extend(
        formatting
            .boundaries()
            .map(|p| text::floor_boundary(text, p.min(len))),
    );
    points.sort_unstable();
    points.dedup();

    let mut segments = Vec::with_capacity(points.len() - 1);
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start == end {
            continue;
        }
        let piece = text::slice(text, start, end);
        if piece.is_empty() {
            continue;
        }
        let mid = (start + end) / 2;
        segments.push(Segment {
            text: piece.to_string(),
            style: resolve_style(formatting, mid),
            start,
            end,
        });
    }
    segments
}

/// Styles in effect at `offset`. First match in insertion order wins per kind.
pub fn resolve_style(formatting: &FormattingData, offset: usize) -> SegmentStyle {
    let emphasis = first_covering(&formatting.emphasis, offset).map(|r| EmphasisFace {
        font: r.font.clone(),
        size: r.size,
        bold: true,
        underline: true,
    });
    let highlight = first_covering(&formatting.highlights, offset).map(|r| r.color);
    let minimized_size = first_covering(&formatting.minimized, offset).map(|r| r.size);

    SegmentStyle {
        emphasis,
        highlight,
        minimized_size,
    }
}

fn first_covering<T: Span>(ranges: &[T], offset: usize) -> Option<&T> {
    ranges.iter().find(|r| r.covers(offset))
}

/// Concatenate segment texts back into the source buffer.
pub fn join(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}
