//! Offset-based formatting metadata
//!
//! Ranges are half-open `[start, end)` intervals over the UTF-16 offsets of a
//! plain-text buffer. They carry no copy of the text.

mod data;
mod minimize;
mod range;

pub use data::FormattingData;
pub use minimize::minimized_complement;
pub use range::{
    validate_bounds, EmphasisRange, EmphasisStyle, HighlightColor, HighlightRange, MinimizedRange,
    RangeError, RangeKind, RangePayload, Span,
};
