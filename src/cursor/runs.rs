//! A rendered run tree: one text node per segment

use super::TextTree;
use crate::segment::Segment;
use uuid::Uuid;

/// Handle to one run of a specific render.
///
/// Handles from an earlier render never match a newer tree, the same way a
/// detached DOM node is no longer inside the editor root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunHandle {
    tree: Uuid,
    index: usize,
}

impl RunHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The text-node sequence produced by rendering a list of segments.
#[derive(Debug, Clone)]
pub struct RunTree {
    id: Uuid,
    runs: Vec<String>,
}

impl RunTree {
    pub fn new(runs: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            runs,
        }
    }

    /// Render segments as runs, one per segment.
    pub fn from_segments(segments: &[Segment]) -> Self {
        Self::new(segments.iter().map(|s| s.text.clone()).collect())
    }

    /// Handle for the run at `index`, if it exists.
    pub fn handle(&self, index: usize) -> Option<RunHandle> {
        (index < self.runs.len()).then_some(RunHandle { tree: self.id, index })
    }

    pub fn run_text(&self, handle: &RunHandle) -> Option<&str> {
        if handle.tree != self.id {
            return None;
        }
        self.runs.get(handle.index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl TextTree for RunTree {
    type Node = RunHandle;

    fn text_nodes(&self) -> impl Iterator<Item = (&str, RunHandle)> + '_ {
        self.runs.iter().enumerate().map(|(index, run)| {
            (
                run.as_str(),
                RunHandle {
                    tree: self.id,
                    index,
                },
            )
        })
    }
}
