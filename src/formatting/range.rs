//! Range types stored in formatting data

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A half-open `[start, end)` interval over UTF-16 offsets.
pub trait Span {
    fn start(&self) -> usize;
    fn end(&self) -> usize;

    /// True if `offset` falls inside the interval.
    fn covers(&self, offset: usize) -> bool {
        offset >= self.start() && offset < self.end()
    }
}

/// The single emphasis style the editor applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmphasisStyle {
    #[default]
    #[serde(rename = "bold-underline")]
    BoldUnderline,
}

/// An emphasized span rendered bold and underlined in a given font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisRange {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub style: EmphasisStyle,
    pub font: String,
    pub size: f32,
}

/// Highlighter colors offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    Green,
    Blue,
    Pink,
}

impl HighlightColor {
    /// All colors, in the order the color picker lists them.
    pub const ALL: [HighlightColor; 4] = [Self::Yellow, Self::Green, Self::Blue, Self::Pink];

    /// Class name the renderer attaches to highlighted segments.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Yellow => "highlight-yellow",
            Self::Green => "highlight-green",
            Self::Blue => "highlight-blue",
            Self::Pink => "highlight-pink",
        }
    }

    /// Pastel background color as a hex string.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Yellow => "#fff59d",
            Self::Green => "#c5e1a5",
            Self::Blue => "#b3e5fc",
            Self::Pink => "#f8bbd0",
        }
    }
}

impl std::fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Pink => "pink",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
    pub color: HighlightColor,
}

/// De-emphasized text, rendered at a reduced font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizedRange {
    pub start: usize,
    pub end: usize,
    pub size: f32,
}

macro_rules! impl_span {
    ($($ty:ty),*) => {
        $(impl Span for $ty {
            fn start(&self) -> usize {
                self.start
            }
            fn end(&self) -> usize {
                self.end
            }
        })*
    };
}

impl_span!(EmphasisRange, HighlightRange, MinimizedRange);

/// Which of the three range lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    Emphasis,
    Highlight,
    Minimize,
}

impl std::fmt::Display for RangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Emphasis => write!(f, "emphasis"),
            Self::Highlight => write!(f, "highlight"),
            Self::Minimize => write!(f, "minimize"),
        }
    }
}

/// The kind-specific half of a new range.
#[derive(Debug, Clone, PartialEq)]
pub enum RangePayload {
    Emphasis { font: String, size: f32 },
    Highlight(HighlightColor),
    Minimize { size: f32 },
}

impl RangePayload {
    pub fn kind(&self) -> RangeKind {
        match self {
            Self::Emphasis { .. } => RangeKind::Emphasis,
            Self::Highlight(_) => RangeKind::Highlight,
            Self::Minimize { .. } => RangeKind::Minimize,
        }
    }
}

/// Why a range was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("empty or inverted range [{start}, {end})")]
    Empty { start: i64, end: i64 },

    #[error("range [{start}, {end}) outside text of length {len}")]
    OutOfBounds { start: i64, end: i64, len: usize },
}

/// Validate raw host-supplied bounds against a text length.
///
/// Bounds arrive signed because hosts report selections as plain integers;
/// a negative bound is out of bounds rather than unrepresentable.
pub fn validate_bounds(start: i64, end: i64, text_len: usize) -> Result<(usize, usize), RangeError> {
    if start >= end {
        return Err(RangeError::Empty { start, end });
    }
    let len = i64::try_from(text_len).unwrap_or(i64::MAX);
    if start < 0 || end > len {
        return Err(RangeError::OutOfBounds {
            start,
            end,
            len: text_len,
        });
    }
    // both bounds are within [0, text_len] here
    Ok((start as usize, end as usize))
}
