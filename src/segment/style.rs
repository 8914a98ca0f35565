//! Resolved style set attached to a segment

use crate::formatting::HighlightColor;
use serde::Serialize;

/// Font face of an emphasized run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmphasisFace {
    pub font: String,
    pub size: f32,
    pub bold: bool,
    pub underline: bool,
}

/// Merged styles for one segment. Kinds are additive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentStyle {
    pub emphasis: Option<EmphasisFace>,
    pub highlight: Option<HighlightColor>,
    pub minimized_size: Option<f32>,
}

impl SegmentStyle {
    /// True when no kind matched; the renderer draws such runs as plain text.
    pub fn is_plain(&self) -> bool {
        self.emphasis.is_none() && self.highlight.is_none() && self.minimized_size.is_none()
    }

    /// Font size the renderer should use, if any kind sets one.
    ///
    /// Minimize is composed after emphasis, so its size wins.
    pub fn font_size(&self) -> Option<f32> {
        self.minimized_size
            .or_else(|| self.emphasis.as_ref().map(|e| e.size))
    }

    /// Class names for hosts that style through stylesheets.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.emphasis.is_some() {
            classes.push("emphasis");
        }
        if let Some(color) = self.highlight {
            classes.push(color.css_class());
        }
        if self.minimized_size.is_some() {
            classes.push("minimized");
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_plain() {
        let style = SegmentStyle::default();
        assert!(style.is_plain());
        assert!(style.classes().is_empty());
        assert_eq!(style.font_size(), None);
    }

    #[test]
    fn minimized_size_overrides_emphasis_size() {
        let style = SegmentStyle {
            emphasis: Some(EmphasisFace {
                font: "Calibri".to_string(),
                size: 13.0,
                bold: true,
                underline: true,
            }),
            highlight: Some(HighlightColor::Yellow),
            minimized_size: Some(6.0),
        };
        assert_eq!(style.font_size(), Some(6.0));
        assert_eq!(style.classes(), vec!["emphasis", "highlight-yellow", "minimized"]);
    }
}
