//! Skein: a small foundation layer of manually-managed containers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Skein sub-crates. For most users, adding `skein` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skein::prelude::*;
//!
//! // Growable byte buffer.
//! let mut a = ByteBuffer::from_slice(b"abc");
//! a.append(&ByteBuffer::from_slice(b"def"));
//! assert_eq!(a.read(0, 6), b"abcdef");
//!
//! // Doubly-linked list of opaque references.
//! let one = ElementRef::new(1).unwrap();
//! let two = ElementRef::new(2).unwrap();
//! let mut list = LinkedList::new();
//! list.append(one);
//! let node = list.append(two);
//! list.remove_node(node);
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![one]);
//!
//! // Shared across threads.
//! let shared = std::sync::Arc::new(AsyncLinkedList::new());
//! let worker = {
//!     let shared = std::sync::Arc::clone(&shared);
//!     std::thread::spawn(move || { shared.append(one); })
//! };
//! worker.join().unwrap();
//! assert_eq!(shared.len(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skein-core` | `ElementRef`, `ListId`, `Disposer`, errors, config |
//! | [`buffer`] | `skein-buffer` | `ByteBuffer` |
//! | [`list`] | `skein-list` | `LinkedList`, `IndexList`, cursors |
//! | [`sync`] | `skein-sync` | `AsyncLinkedList`, `AsyncCursor` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: element references, list ids, disposers, errors, config.
pub mod types {
    pub use skein_core::*;
}

/// Growable contiguous byte buffer.
pub mod buffer {
    pub use skein_buffer::*;
}

/// Linked list and index list containers.
pub mod list {
    pub use skein_list::*;
}

/// Mutex-guarded linked list.
pub mod sync {
    pub use skein_sync::*;
}

/// Common imports for typical usage.
pub mod prelude {
    pub use skein_buffer::ByteBuffer;
    pub use skein_core::{BufferError, Disposer, ElementRef, ListConfig, ListError};
    pub use skein_list::{Cursor, IndexCursor, IndexList, LinkedList, NodeHandle};
    pub use skein_sync::{AsyncCursor, AsyncLinkedList};
}
