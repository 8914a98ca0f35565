//! Anchor coordinates for the floating candidate list

use crate::text;
use serde::{Deserialize, Serialize};

/// A rectangle in host coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Where the overlay's top-left corner goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub top: f64,
    pub left: f64,
}

/// What the host can tell us about its geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum HostGeometry {
    /// A plain text control with a single bounding rectangle.
    PlainText {
        bounds: Rect,
        /// Measured line height; estimated from font size when absent
        line_height: Option<f64>,
        /// Font size in effect at the caret, if the host reports one
        font_size: Option<f64>,
    },
    /// A rich host that can report the live selection rectangle.
    Rich {
        bounds: Rect,
        selection: Option<Rect>,
    },
}

impl HostGeometry {
    pub fn bounds(&self) -> Rect {
        match self {
            Self::PlainText { bounds, .. } | Self::Rich { bounds, .. } => *bounds,
        }
    }
}

/// Line height used when the host does not measure one.
pub fn estimated_line_height(font_size: f64) -> f64 {
    font_size * 1.5
}

/// Compute the overlay anchor for a caret at UTF-16 offset `cursor` in `text`.
///
/// Always produces a coordinate; without a usable caret rectangle the anchor
/// falls back to the bottom-left of the host bounds.
pub fn compute_anchor(geometry: &HostGeometry, text: &str, cursor: usize, margin: f64) -> Anchor {
    match geometry {
        HostGeometry::PlainText {
            bounds,
            line_height,
            font_size,
        } => {
            let Some(height) = line_height.or_else(|| font_size.map(estimated_line_height)) else {
                return fallback(bounds);
            };
            let before = text::slice(text, 0, cursor);
            let line = before.matches('\n').count() as f64;
            Anchor {
                top: bounds.top + (line + 1.0) * height + margin,
                left: bounds.left,
            }
        }
        HostGeometry::Rich {
            selection: Some(rect),
            ..
        } if is_usable(rect) => Anchor {
            top: rect.bottom() + margin,
            left: rect.left,
        },
        HostGeometry::Rich { bounds, .. } => fallback(bounds),
    }
}

fn is_usable(rect: &Rect) -> bool {
    rect.top.is_finite() && rect.left.is_finite() && rect.height.is_finite() && rect.height >= 0.0
}

fn fallback(bounds: &Rect) -> Anchor {
    Anchor {
        top: bounds.bottom(),
        left: bounds.left,
    }
}
