//! Dense, index-addressable list packed into a byte buffer.
//!
//! Each element occupies one fixed-width slot of
//! [`ElementRef::WIDTH`] bytes at offset `index * WIDTH` in the backing
//! [`ByteBuffer`]. Slots `[0, count)` are always live and contiguous;
//! every removal closes its gap.

use std::fmt;

use skein_buffer::ByteBuffer;
use skein_core::{Disposer, ElementRef, ListConfig};

use crate::cursor::IndexCursor;

const SLOT_WIDTH: usize = ElementRef::WIDTH;

/// A growable sequence of opaque element references addressed by index.
///
/// `push` is amortised O(1) (the backing buffer doubles its capacity);
/// `get` is O(1); `remove` shifts the tail down in O(n); `swap_remove`
/// is O(1). Not internally synchronised.
pub struct IndexList {
    /// Backing slot storage. `store.size() >= count * SLOT_WIDTH`.
    store: ByteBuffer,
    /// Number of live slots.
    count: usize,
    disposer: Option<Disposer>,
}

impl IndexList {
    /// Create an empty list without a disposer.
    pub fn new() -> Self {
        Self::from_config(&ListConfig::default(), None)
    }

    /// Create an empty list whose removed elements are handed to `disposer`.
    pub fn with_disposer(disposer: Disposer) -> Self {
        Self::from_config(&ListConfig::default(), Some(disposer))
    }

    /// Create an empty list reserving `config.initial_slots` slots.
    pub fn from_config(config: &ListConfig, disposer: Option<Disposer>) -> Self {
        Self {
            store: ByteBuffer::new(config.initial_slots * SLOT_WIDTH),
            count: 0,
            disposer,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bytes currently reserved by the backing buffer.
    pub fn allocation(&self) -> usize {
        self.store.allocation()
    }

    /// Add `data` after the last element.
    pub fn push(&mut self, data: ElementRef) {
        self.store
            .write(&data.to_le_bytes(), self.count * SLOT_WIDTH);
        self.count += 1;
    }

    /// The element at `index`, or `None` if `index >= len()`.
    pub fn get(&self, index: usize) -> Option<ElementRef> {
        if index >= self.count {
            return None;
        }
        self.slot(index)
    }

    /// Remove the element at `index` by moving the last element into its
    /// slot. Does not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn swap_remove(&mut self, index: usize) {
        self.expect_in_range(index, "swap_remove");
        let removed = self.slot(index);
        let last = self.count - 1;
        if index != last {
            let mut word = [0u8; SLOT_WIDTH];
            self.store
                .read_into(last * SLOT_WIDTH, SLOT_WIDTH, &mut word);
            self.store.write(&word, index * SLOT_WIDTH);
        }
        self.count -= 1;
        if let Some(data) = removed {
            self.dispose(data);
        }
    }

    /// Remove the element at `index`, shifting later elements down.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) {
        self.expect_in_range(index, "remove");
        let removed = self.slot(index);
        let tail_start = (index + 1) * SLOT_WIDTH;
        let tail_len = (self.count - index - 1) * SLOT_WIDTH;
        if tail_len > 0 {
            let tail = self.store.read(tail_start, tail_len).to_vec();
            self.store.write(&tail, index * SLOT_WIDTH);
        }
        self.count -= 1;
        if let Some(data) = removed {
            self.dispose(data);
        }
    }

    /// Remove every element, disposing each in index order.
    ///
    /// The backing buffer keeps its allocation.
    pub fn clear(&mut self) {
        let count = self.count;
        self.count = 0;
        if self.disposer.is_none() {
            return;
        }
        for index in 0..count {
            if let Some(data) = self.slot(index) {
                self.dispose(data);
            }
        }
    }

    /// Create a cursor at index 0.
    pub fn begin_iterate(&self) -> IndexCursor {
        IndexCursor::default()
    }

    /// Yield the element at the cursor and advance it.
    ///
    /// Returns `None` once the cursor reaches `len()`.
    pub fn iterate(&self, cursor: &mut IndexCursor) -> Option<ElementRef> {
        let data = self.get(cursor.position)?;
        cursor.position += 1;
        Some(data)
    }

    /// Rewind the cursor to index 0.
    pub fn reset_iterator(&self, cursor: &mut IndexCursor) {
        cursor.position = 0;
    }

    /// Finish a traversal, consuming the cursor.
    pub fn end_iterate(&self, _cursor: IndexCursor) {}

    /// Borrowing front-to-back traversal.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: IndexCursor::default(),
        }
    }

    fn slot(&self, index: usize) -> Option<ElementRef> {
        let mut word = [0u8; SLOT_WIDTH];
        self.store
            .read_into(index * SLOT_WIDTH, SLOT_WIDTH, &mut word);
        ElementRef::from_le_bytes(word)
    }

    fn dispose(&mut self, data: ElementRef) {
        if let Some(disposer) = self.disposer.as_mut() {
            disposer(data);
        }
    }

    fn expect_in_range(&self, index: usize, op: &str) {
        assert!(
            index < self.count,
            "IndexList::{op}: index {index} out of range for list of length {}",
            self.count
        );
    }
}

impl Default for IndexList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IndexList {
    fn drop(&mut self) {
        if self.disposer.is_some() && self.count > 0 {
            tracing::debug!(elements = self.count, "disposing index list");
        }
        self.clear();
        self.store.clear();
    }
}

impl fmt::Debug for IndexList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexList")
            .field("len", &self.count)
            .field("allocation", &self.store.allocation())
            .field("has_disposer", &self.disposer.is_some())
            .finish()
    }
}

/// Front-to-back iterator over an [`IndexList`], created by
/// [`IndexList::iter`].
pub struct Iter<'a> {
    list: &'a IndexList,
    cursor: IndexCursor,
}

impl Iterator for Iter<'_> {
    type Item = ElementRef;

    fn next(&mut self) -> Option<ElementRef> {
        self.list.iterate(&mut self.cursor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.count.saturating_sub(self.cursor.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a IndexList {
    type Item = ElementRef;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
