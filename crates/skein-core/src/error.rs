//! Error types for the Skein containers.
//!
//! Every container contract in this workspace is fail-fast: the plain
//! operation panics on violation. The `try_` siblings surface the same
//! conditions as these enums for callers that validate input from
//! untrusted sources.

use std::error::Error;
use std::fmt;

use crate::element::ListId;

/// Errors from byte buffer operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// A resize to zero bytes was requested.
    ZeroSize,
    /// A read or write range reaches past the logical size.
    OutOfBounds {
        /// Start of the requested range in bytes.
        position: usize,
        /// Length of the requested range in bytes.
        amount: usize,
        /// Logical size of the buffer at the time of the request.
        size: usize,
    },
    /// The caller-supplied destination cannot hold the requested bytes.
    DestinationTooSmall {
        /// Bytes the read would copy.
        needed: usize,
        /// Bytes available in the destination.
        available: usize,
    },
    /// Construction from existing data was given an empty source.
    EmptySource,
    /// The requested size has no power-of-two allocation class in `usize`.
    CapacityOverflow {
        /// The logical size that was requested.
        requested: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "buffer size must be non-zero"),
            Self::OutOfBounds {
                position,
                amount,
                size,
            } => {
                write!(
                    f,
                    "range {position}..{position}+{amount} out of bounds for buffer of size {size}"
                )
            }
            Self::DestinationTooSmall { needed, available } => {
                write!(
                    f,
                    "destination too small: need {needed} bytes, have {available}"
                )
            }
            Self::EmptySource => write!(f, "source data must be non-empty"),
            Self::CapacityOverflow { requested } => {
                write!(f, "no allocation class can hold {requested} bytes")
            }
        }
    }
}

impl Error for BufferError {}

/// Errors from linked list structural operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// A node handle produced by a different list was passed in.
    ForeignHandle {
        /// The list the handle belongs to.
        handle_list: ListId,
        /// The list the operation was invoked on.
        list: ListId,
    },
    /// A node handle refers to a node that has already been removed.
    StaleHandle {
        /// Slot index encoded in the handle.
        index: u32,
        /// Generation encoded in the handle.
        generation: u32,
    },
    /// A cursor produced by a different list was passed in.
    ForeignCursor {
        /// The list the cursor belongs to.
        cursor_list: ListId,
        /// The list the operation was invoked on.
        list: ListId,
    },
    /// A chain link is not mirrored by its neighbour's back-link.
    BrokenLink {
        /// Slot index of the node whose link is inconsistent.
        index: u32,
    },
    /// The stored element count disagrees with the reachable node count.
    CountMismatch {
        /// Count recorded by the list.
        recorded: usize,
        /// Nodes reachable from the head.
        reachable: usize,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignHandle { handle_list, list } => {
                write!(f, "node handle from list {handle_list} used on list {list}")
            }
            Self::StaleHandle { index, generation } => {
                write!(
                    f,
                    "stale node handle: slot {index}, generation {generation}"
                )
            }
            Self::ForeignCursor { cursor_list, list } => {
                write!(f, "cursor from list {cursor_list} used on list {list}")
            }
            Self::BrokenLink { index } => {
                write!(f, "broken chain link at slot {index}")
            }
            Self::CountMismatch {
                recorded,
                reachable,
            } => {
                write!(
                    f,
                    "list count {recorded} does not match {reachable} reachable nodes"
                )
            }
        }
    }
}

impl Error for ListError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_range() {
        let err = BufferError::OutOfBounds {
            position: 4,
            amount: 8,
            size: 10,
        };
        assert_eq!(
            err.to_string(),
            "range 4..4+8 out of bounds for buffer of size 10"
        );
    }

    #[test]
    fn capacity_overflow_message_names_request() {
        let err = BufferError::CapacityOverflow { requested: 7 };
        assert_eq!(err.to_string(), "no allocation class can hold 7 bytes");
    }

    #[test]
    fn stale_handle_message() {
        let err = ListError::StaleHandle {
            index: 3,
            generation: 2,
        };
        assert_eq!(err.to_string(), "stale node handle: slot 3, generation 2");
    }
}
