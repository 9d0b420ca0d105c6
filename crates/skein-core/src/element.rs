//! Opaque element references, list identity, and the disposer capability.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// An opaque, non-null, word-sized reference to externally owned data.
///
/// Containers store `ElementRef`s, never the data they point at. Two
/// references are equal iff their words are equal (identity comparison);
/// the pointed-to content is never inspected or dereferenced.
///
/// The zero word is reserved as "null", which is why construction is
/// fallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(NonZeroU64);

impl ElementRef {
    /// Width of a packed reference in bytes.
    pub const WIDTH: usize = std::mem::size_of::<u64>();

    /// Wrap a raw word. Returns `None` for the null word `0`.
    pub fn new(word: u64) -> Option<Self> {
        NonZeroU64::new(word).map(Self)
    }

    /// Capture the address of `ptr` as an opaque reference.
    ///
    /// Returns `None` for a null pointer. The pointer is never
    /// dereferenced; keeping the pointee alive is the caller's job.
    pub fn from_ptr<T>(ptr: *const T) -> Option<Self> {
        Self::new(ptr as usize as u64)
    }

    /// The raw word.
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Reinterpret the word as an address.
    pub fn as_ptr<T>(self) -> *const T {
        self.0.get() as usize as *const T
    }

    /// Little-endian encoding used for fixed-width slot packing.
    pub fn to_le_bytes(self) -> [u8; Self::WIDTH] {
        self.0.get().to_le_bytes()
    }

    /// Decode a slot written by [`to_le_bytes`](Self::to_le_bytes).
    ///
    /// Returns `None` if the slot holds the null word.
    pub fn from_le_bytes(bytes: [u8; Self::WIDTH]) -> Option<Self> {
        Self::new(u64::from_le_bytes(bytes))
    }
}

impl From<NonZeroU64> for ElementRef {
    fn from(v: NonZeroU64) -> Self {
        Self(v)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}

/// Counter for unique [`ListId`] allocation.
static LIST_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a linked list.
///
/// Node handles and cursors carry the id of the list that produced them,
/// so handing one list's handle to another is caught instead of silently
/// relinking foreign nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(u64);

impl ListId {
    /// Allocate a fresh, unique list id. Thread-safe.
    pub fn next() -> Self {
        Self(LIST_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback that takes ownership of an element's data when the element
/// leaves its container (removal, clear, or container teardown).
///
/// Containers invoke it exactly once per removed element. It must not
/// call back into the container that invoked it.
pub type Disposer = Box<dyn FnMut(ElementRef) + Send>;
