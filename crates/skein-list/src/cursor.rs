//! Caller-owned iteration cursors.
//!
//! Cursors hold no borrow of their list, so a traversal can be paused,
//! interleaved with mutations, and resumed. Each call to `iterate` is
//! resolved against the list's current state.

use skein_core::ListId;

use crate::linked::NodeHandle;

/// Position within a [`LinkedList`](crate::LinkedList) traversal.
///
/// `position` is the node the next `iterate` call will yield. A cursor
/// whose position node has since been removed behaves as exhausted; it
/// never restarts on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) list: ListId,
    pub(crate) position: Option<NodeHandle>,
    pub(crate) index: u64,
}

impl Cursor {
    pub(crate) fn new(list: ListId, position: Option<NodeHandle>) -> Self {
        Self {
            list,
            position,
            index: 0,
        }
    }

    /// The node the next step will yield, if any.
    pub fn position(&self) -> Option<NodeHandle> {
        self.position
    }

    /// Number of elements yielded since creation or the last reset.
    pub fn index(&self) -> u64 {
        self.index
    }
}

/// Position within an [`IndexList`](crate::IndexList) traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexCursor {
    pub(crate) position: usize,
}

impl IndexCursor {
    /// The slot index the next step will read.
    pub fn position(&self) -> usize {
        self.position
    }
}
