//! List containers for the Skein container layer.
//!
//! Two containers of opaque [`ElementRef`](skein_core::ElementRef)s:
//!
//! - [`LinkedList`]: a doubly-linked chain with O(1) insertion and
//!   removal given a [`NodeHandle`], O(n) identity search, and a
//!   caller-owned [`Cursor`] iteration protocol.
//! - [`IndexList`]: a dense, index-addressable sequence packed into
//!   fixed-width slots of a [`ByteBuffer`](skein_buffer::ByteBuffer).
//!
//! # Architecture
//!
//! ```text
//! LinkedList
//! ├── slots: Vec<Slot>       (node arena, generation per slot)
//! ├── free_list: Vec<u32>    (vacated slots available for reuse)
//! ├── first / last           (slot indices, access points only)
//! └── disposer               (takes ownership of removed data)
//!
//! IndexList
//! ├── store: ByteBuffer      ([0, count) slots of 8 bytes each)
//! └── disposer
//! ```
//!
//! Neither container is internally synchronised. Share one across
//! threads only behind an external lock, or use `skein-sync`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod index;
pub mod linked;

pub use cursor::{Cursor, IndexCursor};
pub use index::IndexList;
pub use linked::{LinkedList, NodeHandle};
