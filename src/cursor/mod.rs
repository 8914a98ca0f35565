//! Cursor/offset mapping between linear offsets and a host's text tree
//!
//! Formatting ranges address text by linear UTF-16 offset, while hosts place
//! the caret inside some tree of text nodes. Re-rendering after a formatting
//! change replaces that tree, so the caret is captured as offsets before the
//! render and restored into the new tree afterwards.

mod runs;

pub use runs::{RunHandle, RunTree};

use crate::text;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A host-side tree of text nodes.
///
/// Only the document-order sequence of text nodes matters; element
/// structure between them is invisible to the mapper.
pub trait TextTree {
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// Text nodes in document order, paired with their handles.
    fn text_nodes(&self) -> impl Iterator<Item = (&str, Self::Node)> + '_;
}

/// A position inside one text node. `offset` counts UTF-16 units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePoint<N> {
    pub node: N,
    pub offset: usize,
}

impl<N> TreePoint<N> {
    pub fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A host selection, as two tree points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<N> {
    pub start: TreePoint<N>,
    pub end: TreePoint<N>,
}

impl<N: Clone> Selection<N> {
    pub fn new(start: TreePoint<N>, end: TreePoint<N>) -> Self {
        Self { start, end }
    }

    /// A caret with no extent.
    pub fn collapsed(point: TreePoint<N>) -> Self {
        Self {
            start: point.clone(),
            end: point,
        }
    }
}

impl<N: PartialEq> Selection<N> {
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A selection expressed as linear UTF-16 offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Convert a tree selection into linear offsets.
///
/// Returns `None` when either end of the selection is not a text node of
/// `tree`. A backwards selection is normalized so `start <= end`.
pub fn capture_offset<T: TextTree>(selection: &Selection<T::Node>, tree: &T) -> Option<OffsetRange> {
    let mut start = None;
    let mut end = None;
    let mut acc = 0;

    for (slice, node) in tree.text_nodes() {
        let len = text::utf16_len(slice);
        if start.is_none() && node == selection.start.node {
            start = Some(acc + selection.start.offset.min(len));
        }
        if end.is_none() && node == selection.end.node {
            end = Some(acc + selection.end.offset.min(len));
        }
        if start.is_some() && end.is_some() {
            break;
        }
        acc += len;
    }

    match (start, end) {
        (Some(s), Some(e)) => Some(OffsetRange::new(s.min(e), s.max(e))),
        _ => {
            debug!("selection outside editor tree; capture skipped");
            None
        }
    }
}

/// Convert linear offsets back into a selection inside `tree`.
///
/// An offset on the boundary between two nodes resolves into the earlier
/// node. Offsets beyond the text collapse to the end of the last node.
/// Returns `None` only when the tree has no text nodes at all.
pub fn restore_offset<T: TextTree>(position: OffsetRange, tree: &T) -> Option<Selection<T::Node>> {
    let nodes: Vec<(usize, T::Node)> = tree
        .text_nodes()
        .map(|(slice, node)| (text::utf16_len(slice), node))
        .collect();

    let Some((last_len, last_node)) = nodes.last().cloned() else {
        debug!("restore into empty tree skipped");
        return None;
    };
    let end_of_content = TreePoint::new(last_node, last_len);

    let locate = |offset: usize| -> Option<TreePoint<T::Node>> {
        let mut acc = 0;
        for (len, node) in &nodes {
            if offset <= acc + len {
                return Some(TreePoint::new(node.clone(), offset - acc));
            }
            acc += len;
        }
        None
    };

    let start = locate(position.start);
    let end = locate(position.end.max(position.start));
    match (start, end) {
        (Some(start), Some(end)) => Some(Selection::new(start, end)),
        (Some(start), None) => Some(Selection::new(start, end_of_content)),
        _ => {
            debug!(
                start = position.start,
                end = position.end,
                "restore position past end of content; collapsing"
            );
            Some(Selection::collapsed(end_of_content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Text nodes identified by their index.
    struct Nodes(Vec<&'static str>);

    impl TextTree for Nodes {
        type Node = usize;

        fn text_nodes(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
            self.0.iter().enumerate().map(|(i, s)| (*s, i))
        }
    }

    #[test]
    fn capture_accumulates_preceding_nodes() {
        let tree = Nodes(vec!["Hello ", "bold", " world"]);
        let selection = Selection::new(TreePoint::new(1, 1), TreePoint::new(2, 3));
        assert_eq!(capture_offset(&selection, &tree), Some(OffsetRange::new(7, 13)));
    }

    #[test]
    fn capture_outside_tree_is_none() {
        let tree = Nodes(vec!["abc"]);
        let selection = Selection::collapsed(TreePoint::new(5, 0));
        assert_eq!(capture_offset(&selection, &tree), None);
    }

    #[test]
    fn capture_normalizes_backwards_selection() {
        let tree = Nodes(vec!["abc", "def"]);
        let selection = Selection::new(TreePoint::new(1, 2), TreePoint::new(0, 1));
        assert_eq!(capture_offset(&selection, &tree), Some(OffsetRange::new(1, 5)));
    }

    #[test]
    fn capture_clamps_offset_to_node_length() {
        let tree = Nodes(vec!["abc", "def"]);
        let selection = Selection::collapsed(TreePoint::new(0, 99));
        assert_eq!(capture_offset(&selection, &tree), Some(OffsetRange::caret(3)));
    }

    #[test]
    fn restore_boundary_prefers_earlier_node() {
        let tree = Nodes(vec!["abc", "def"]);
        let selection = restore_offset(OffsetRange::new(1, 3), &tree).unwrap();
        assert_eq!(selection.start, TreePoint::new(0, 1));
        assert_eq!(selection.end, TreePoint::new(0, 3));
    }

    #[test]
    fn restore_inside_later_node() {
        let tree = Nodes(vec!["abc", "def", "ghi"]);
        let selection = restore_offset(OffsetRange::new(4, 8), &tree).unwrap();
        assert_eq!(selection.start, TreePoint::new(1, 1));
        assert_eq!(selection.end, TreePoint::new(2, 2));
    }

    #[test]
    fn restore_past_end_collapses_to_last_node() {
        let tree = Nodes(vec!["abc", "de"]);
        let selection = restore_offset(OffsetRange::new(10, 12), &tree).unwrap();
        assert!(selection.is_collapsed());
        assert_eq!(selection.start, TreePoint::new(1, 2));
    }

    #[test]
    fn restore_end_past_content_keeps_start() {
        let tree = Nodes(vec!["abc", "de"]);
        let selection = restore_offset(OffsetRange::new(2, 9), &tree).unwrap();
        assert_eq!(selection.start, TreePoint::new(0, 2));
        assert_eq!(selection.end, TreePoint::new(1, 2));
    }

    #[test]
    fn restore_into_empty_tree_is_none() {
        let tree = Nodes(vec![]);
        assert!(restore_offset(OffsetRange::caret(0), &tree).is_none());
    }

    #[test]
    fn capture_then_restore_across_different_splits() {
        let before = Nodes(vec!["Hello world"]);
        let after = Nodes(vec!["Hello ", "world"]);
        let caret = Selection::collapsed(TreePoint::new(0, 8));

        let offsets = capture_offset(&caret, &before).unwrap();
        let restored = restore_offset(offsets, &after).unwrap();
        assert_eq!(restored.start, TreePoint::new(1, 2));
        assert!(restored.is_collapsed());
    }
}
