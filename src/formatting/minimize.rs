//! Complement of the emphasis ranges
//!
//! Backs the "minimize non-emphasized text" command: everything outside an
//! emphasized span is shrunk to a smaller font size.

use super::range::{EmphasisRange, MinimizedRange};

/// Compute the minimized ranges not covered by any emphasis range.
///
/// With no emphasis there is nothing to anchor the complement on, so the
/// `previous` list is returned unchanged.
pub fn minimized_complement(
    emphasis: &[EmphasisRange],
    text_len: usize,
    size: f32,
    previous: &[MinimizedRange],
) -> Vec<MinimizedRange> {
    if emphasis.is_empty() {
        return previous.to_vec();
    }

    let mut sorted: Vec<&EmphasisRange> = emphasis.iter().collect();
    sorted.sort_by_key(|r| r.start);

    let mut out = Vec::with_capacity(sorted.len() + 1);
    let mut cursor = 0;
    for range in sorted {
        if range.start > cursor {
            out.push(MinimizedRange {
                start: cursor,
                end: range.start,
                size,
            });
        }
        cursor = cursor.max(range.end);
    }
    if cursor < text_len {
        out.push(MinimizedRange {
            start: cursor,
            end: text_len,
            size,
        });
    }
    out
}
