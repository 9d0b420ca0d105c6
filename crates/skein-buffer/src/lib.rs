//! Growable contiguous byte buffer for the Skein container layer.
//!
//! A [`ByteBuffer`] is a single contiguous byte region with a logical
//! size and a physical allocation. The allocation is always a power of
//! two and at least [`MIN_ALLOCATION`] bytes, so growth is geometric and
//! appends are amortised O(1).
//!
//! ```text
//! ByteBuffer
//! ├── data: Vec<u8>   (len == allocation, exclusively owned)
//! └── size: usize     (logical length, <= allocation)
//! ```
//!
//! The buffer is not thread-safe in the sense that it carries no
//! internal synchronisation. Sharing one across threads requires an
//! external lock.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;

pub use buffer::{allocation_for, ByteBuffer, MIN_ALLOCATION};
