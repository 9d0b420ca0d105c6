//! Mutex-guarded decorator over the Skein linked list.
//!
//! [`AsyncLinkedList`] owns a [`LinkedList`](skein_list::LinkedList) and
//! serialises every call to it behind one coarse lock. Each forwarded
//! call is a single critical section; a traversal is a sequence of
//! critical sections, one per step (see [`AsyncCursor`]).
//!
//! # Locking contract
//!
//! - Calls are linearizable one at a time. A full traversal is not
//!   atomic: mutations from other threads between steps are visible,
//!   and a node removed under a paused cursor ends that traversal.
//! - Use [`AsyncLinkedList::snapshot`] or [`AsyncLinkedList::with_list`]
//!   when several steps must observe one consistent state.
//! - The lock is not reentrant. A disposer that calls back into the same
//!   `AsyncLinkedList` deadlocks.
//! - Blocking is unbounded: there is no timeout or cancellation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod list;

pub use list::{AsyncCursor, AsyncLinkedList};
