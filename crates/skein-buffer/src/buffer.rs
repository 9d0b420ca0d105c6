//! The [`ByteBuffer`] type and its capacity policy.

use std::fmt;

use skein_core::BufferError;

/// Smallest physical allocation of any buffer, in bytes.
pub const MIN_ALLOCATION: usize = 32;

/// Physical allocation for a buffer holding `size` logical bytes.
///
/// Returns the smallest power of two that is a multiple of
/// [`MIN_ALLOCATION`] and `>= size`, or `None` when that power of two
/// does not fit in `usize`. A zero size still reserves one minimum unit.
pub fn allocation_for(size: usize) -> Option<usize> {
    size.checked_next_power_of_two().map(|class| class.max(MIN_ALLOCATION))
}

/// A contiguous, resizable byte region with geometric capacity growth.
///
/// Bytes in `[0, size)` are the buffer's content. Bytes in
/// `[size, allocation)` are reserved storage whose content is
/// unspecified: they start zeroed but may hold stale bytes after a
/// shrink. Shrinking never gives capacity back.
#[derive(Clone)]
pub struct ByteBuffer {
    /// Backing storage. `data.len()` is the physical allocation.
    data: Vec<u8>,
    /// Logical length in bytes.
    size: usize,
}

impl ByteBuffer {
    /// Create a buffer with a logical size of `size` bytes.
    ///
    /// The allocation rounds up to [`allocation_for(size)`](allocation_for).
    ///
    /// # Panics
    ///
    /// Panics if `size` has no allocation class.
    pub fn new(size: usize) -> Self {
        let allocation = allocation_for(size).unwrap_or_else(|| {
            let e = BufferError::CapacityOverflow { requested: size };
            panic!("ByteBuffer::new: {e}")
        });
        Self {
            data: vec![0; allocation],
            size,
        }
    }

    /// Create a buffer whose content is a copy of `source`.
    ///
    /// The caller keeps ownership of `source`; the buffer never aliases it.
    ///
    /// # Panics
    ///
    /// Panics if `source` is empty.
    pub fn from_slice(source: &[u8]) -> Self {
        match Self::try_from_slice(source) {
            Ok(buffer) => buffer,
            Err(e) => panic!("ByteBuffer::from_slice: {e}"),
        }
    }

    /// Checked form of [`from_slice`](Self::from_slice).
    pub fn try_from_slice(source: &[u8]) -> Result<Self, BufferError> {
        if source.is_empty() {
            return Err(BufferError::EmptySource);
        }
        let mut buffer = Self::new(source.len());
        buffer.data[..source.len()].copy_from_slice(source);
        Ok(buffer)
    }

    /// Logical length in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Physical capacity in bytes.
    pub fn allocation(&self) -> usize {
        self.data.len()
    }

    /// Whether the logical size is zero.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The logical content `[0, size)`.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Change the logical size to `new_size`.
    ///
    /// Grows the allocation when `new_size` needs a larger power-of-two
    /// class; the bytes below `min(old_size, new_size)` keep their
    /// offsets and values. Shrinking only lowers the logical size.
    ///
    /// # Panics
    ///
    /// Panics if `new_size` is zero or has no allocation class.
    pub fn resize(&mut self, new_size: usize) {
        if let Err(e) = self.try_resize(new_size) {
            panic!("ByteBuffer::resize: {e}");
        }
    }

    /// Checked form of [`resize`](Self::resize).
    pub fn try_resize(&mut self, new_size: usize) -> Result<(), BufferError> {
        if new_size == 0 {
            return Err(BufferError::ZeroSize);
        }
        let needed = allocation_for(new_size).ok_or(BufferError::CapacityOverflow {
            requested: new_size,
        })?;
        if needed > self.data.len() {
            tracing::trace!(
                from = self.data.len(),
                to = needed,
                size = new_size,
                "byte buffer reallocating"
            );
            self.data.reserve_exact(needed - self.data.len());
            self.data.resize(needed, 0);
        }
        self.size = new_size;
        Ok(())
    }

    /// Borrow `amount` bytes starting at `position`.
    ///
    /// The borrow ends before any further mutation of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `position + amount` exceeds the logical size.
    pub fn read(&self, position: usize, amount: usize) -> &[u8] {
        match self.try_read(position, amount) {
            Ok(bytes) => bytes,
            Err(e) => panic!("ByteBuffer::read: {e}"),
        }
    }

    /// Checked form of [`read`](Self::read).
    pub fn try_read(&self, position: usize, amount: usize) -> Result<&[u8], BufferError> {
        let end = self.checked_end(position, amount)?;
        Ok(&self.data[position..end])
    }

    /// Copy `amount` bytes starting at `position` into `destination`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the logical size or `destination` is
    /// shorter than `amount`.
    pub fn read_into(&self, position: usize, amount: usize, destination: &mut [u8]) {
        if let Err(e) = self.try_read_into(position, amount, destination) {
            panic!("ByteBuffer::read_into: {e}");
        }
    }

    /// Checked form of [`read_into`](Self::read_into).
    pub fn try_read_into(
        &self,
        position: usize,
        amount: usize,
        destination: &mut [u8],
    ) -> Result<(), BufferError> {
        let end = self.checked_end(position, amount)?;
        if destination.len() < amount {
            return Err(BufferError::DestinationTooSmall {
                needed: amount,
                available: destination.len(),
            });
        }
        destination[..amount].copy_from_slice(&self.data[position..end]);
        Ok(())
    }

    /// Copy `bytes` into the buffer at `position`.
    ///
    /// If the write reaches past the logical end, the buffer is resized
    /// to `position + bytes.len()` first. Any gap between the old end and
    /// `position` holds unspecified bytes.
    ///
    /// # Panics
    ///
    /// Panics if `position + bytes.len()` overflows or has no allocation
    /// class.
    pub fn write(&mut self, bytes: &[u8], position: usize) {
        let end = position
            .checked_add(bytes.len())
            .unwrap_or_else(|| panic!("ByteBuffer::write: position {position} overflows"));
        if end > self.size {
            self.resize(end);
        }
        self.data[position..end].copy_from_slice(bytes);
    }

    /// Append the content of `source` after this buffer's logical end.
    ///
    /// Equivalent to `self.write(source.as_slice(), self.size())`.
    pub fn append(&mut self, source: &ByteBuffer) {
        if source.is_empty() {
            return;
        }
        let end = self.size;
        self.write(source.as_slice(), end);
    }

    /// Release the backing storage and zero both counters.
    ///
    /// The buffer stays usable: the next resize or write allocates again.
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.size = 0;
    }

    fn checked_end(&self, position: usize, amount: usize) -> Result<usize, BufferError> {
        match position.checked_add(amount) {
            Some(end) if end <= self.size => Ok(end),
            _ => Err(BufferError::OutOfBounds {
                position,
                amount,
                size: self.size,
            }),
        }
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Buffers compare by logical content; allocation is ignored.
impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer {}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("size", &self.size)
            .field("allocation", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_rounds_to_power_of_two_multiple_of_32() {
        assert_eq!(allocation_for(0), Some(32));
        assert_eq!(allocation_for(1), Some(32));
        assert_eq!(allocation_for(32), Some(32));
        assert_eq!(allocation_for(33), Some(64));
        assert_eq!(allocation_for(100), Some(128));
        assert_eq!(allocation_for(4096), Some(4096));
    }

    #[test]
    fn small_buffer_write_does_not_grow() {
        let mut buf = ByteBuffer::new(10);
        assert_eq!(buf.allocation(), 32);
        buf.write(b"hello", 0);
        assert_eq!(buf.size(), 10);
        assert_eq!(buf.read(0, 5), b"hello");
    }

    #[test]
    fn append_concatenates_logical_content() {
        let mut a = ByteBuffer::from_slice(b"abc");
        let b = ByteBuffer::from_slice(b"def");
        a.append(&b);
        assert_eq!(a.size(), 6);
        assert_eq!(a.read(0, 6), b"abcdef");
    }

    #[test]
    fn from_slice_copies_source() {
        let mut source = vec![1u8, 2, 3];
        let buf = ByteBuffer::from_slice(&source);
        source[0] = 99;
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
        assert_eq!(buf.allocation(), 32);
    }

    #[test]
    fn from_empty_slice_is_rejected() {
        assert_eq!(
            ByteBuffer::try_from_slice(&[]),
            Err(BufferError::EmptySource)
        );
    }

    #[test]
    #[should_panic(expected = "source data must be non-empty")]
    fn from_empty_slice_panics() {
        let _ = ByteBuffer::from_slice(&[]);
    }

    #[test]
    fn resize_to_zero_is_rejected() {
        let mut buf = ByteBuffer::new(4);
        assert_eq!(buf.try_resize(0), Err(BufferError::ZeroSize));
        assert_eq!(buf.size(), 4);
    }

    #[test]
    fn resize_past_largest_class_is_rejected() {
        assert_eq!(allocation_for(usize::MAX), None);
        let mut buf = ByteBuffer::from_slice(b"abcd");
        assert_eq!(
            buf.try_resize(usize::MAX),
            Err(BufferError::CapacityOverflow {
                requested: usize::MAX
            })
        );
        assert_eq!(buf.size(), 4);
        assert_eq!(buf.allocation(), 32);
        assert_eq!(buf.as_slice(), b"abcd");
    }

    #[test]
    #[should_panic(expected = "no allocation class can hold")]
    fn write_at_unreachable_position_panics() {
        let mut buf = ByteBuffer::new(4);
        buf.write(b"x", usize::MAX - 1);
    }

    #[test]
    #[should_panic(expected = "buffer size must be non-zero")]
    fn resize_to_zero_panics() {
        ByteBuffer::new(4).resize(0);
    }

    #[test]
    fn growth_preserves_existing_bytes() {
        let mut buf = ByteBuffer::new(4);
        buf.write(&[9, 8, 7, 6], 0);
        buf.resize(1000);
        assert_eq!(buf.allocation(), 1024);
        assert_eq!(buf.read(0, 4), &[9, 8, 7, 6]);
    }

    #[test]
    fn shrink_keeps_allocation() {
        let mut buf = ByteBuffer::new(500);
        assert_eq!(buf.allocation(), 512);
        buf.resize(10);
        assert_eq!(buf.size(), 10);
        assert_eq!(buf.allocation(), 512);
    }

    #[test]
    fn regrow_within_allocation_does_not_reallocate() {
        let mut buf = ByteBuffer::new(40);
        buf.write(&[1; 40], 0);
        buf.resize(2);
        buf.resize(60);
        assert_eq!(buf.allocation(), 64);
        assert_eq!(buf.read(0, 2), &[1, 1]);
    }

    #[test]
    fn write_past_end_extends_size() {
        let mut buf = ByteBuffer::new(2);
        buf.write(b"xyz", 30);
        assert_eq!(buf.size(), 33);
        assert_eq!(buf.allocation(), 64);
        assert_eq!(buf.read(30, 3), b"xyz");
    }

    #[test]
    fn empty_write_at_end_is_noop() {
        let mut buf = ByteBuffer::new(0);
        buf.write(&[], 0);
        assert_eq!(buf.size(), 0);
    }

    #[test]
    fn out_of_bounds_read_is_rejected() {
        let buf = ByteBuffer::new(8);
        assert_eq!(
            buf.try_read(4, 5),
            Err(BufferError::OutOfBounds {
                position: 4,
                amount: 5,
                size: 8
            })
        );
        assert!(buf.try_read(usize::MAX, 2).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_read_panics() {
        let buf = ByteBuffer::new(8);
        let _ = buf.read(8, 1);
    }

    #[test]
    fn read_into_copies_range() {
        let buf = ByteBuffer::from_slice(b"0123456789");
        let mut dest = [0u8; 4];
        buf.read_into(3, 4, &mut dest);
        assert_eq!(&dest, b"3456");
    }

    #[test]
    fn read_into_short_destination_is_rejected() {
        let buf = ByteBuffer::from_slice(b"0123456789");
        let mut dest = [0u8; 2];
        assert_eq!(
            buf.try_read_into(0, 4, &mut dest),
            Err(BufferError::DestinationTooSmall {
                needed: 4,
                available: 2
            })
        );
    }

    #[test]
    fn append_empty_source_is_noop() {
        let mut a = ByteBuffer::new(0);
        a.append(&ByteBuffer::new(0));
        assert_eq!(a.size(), 0);
    }

    #[test]
    fn append_across_class_boundary() {
        let mut a = ByteBuffer::from_slice(&[1; 30]);
        let b = ByteBuffer::from_slice(&[2; 30]);
        a.append(&b);
        assert_eq!(a.size(), 60);
        assert_eq!(a.allocation(), 64);
        assert!(a.read(0, 30).iter().all(|&v| v == 1));
        assert!(a.read(30, 30).iter().all(|&v| v == 2));
    }

    #[test]
    fn clear_zeroes_counters_and_allows_reuse() {
        let mut buf = ByteBuffer::from_slice(b"abc");
        buf.clear();
        assert_eq!(buf.size(), 0);
        assert_eq!(buf.allocation(), 0);
        buf.write(b"z", 0);
        assert_eq!(buf.as_slice(), b"z");
        assert_eq!(buf.allocation(), 32);
    }

    #[test]
    fn equality_ignores_allocation() {
        let mut a = ByteBuffer::new(500);
        a.resize(3);
        a.write(b"abc", 0);
        let b = ByteBuffer::from_slice(b"abc");
        assert_ne!(a.allocation(), b.allocation());
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn new_allocation_is_smallest_class(size in 1usize..100_000) {
                let buf = ByteBuffer::new(size);
                let alloc = buf.allocation();
                prop_assert_eq!(buf.size(), size);
                prop_assert!(alloc.is_power_of_two());
                prop_assert_eq!(alloc % MIN_ALLOCATION, 0);
                prop_assert!(alloc >= size);
                prop_assert!(alloc == MIN_ALLOCATION || alloc / 2 < size);
            }

            #[test]
            fn write_then_read_round_trips(
                bytes in proptest::collection::vec(any::<u8>(), 1..2048),
                initial in 0usize..64,
            ) {
                let mut buf = ByteBuffer::new(initial);
                buf.write(&bytes, 0);
                prop_assert_eq!(buf.read(0, bytes.len()), bytes.as_slice());
                prop_assert!(buf.size() >= bytes.len());
            }

            #[test]
            fn growth_keeps_prefix(
                bytes in proptest::collection::vec(any::<u8>(), 1..256),
                grow_to in 256usize..8192,
            ) {
                let mut buf = ByteBuffer::from_slice(&bytes);
                buf.resize(grow_to);
                prop_assert_eq!(buf.read(0, bytes.len()), bytes.as_slice());
            }

            #[test]
            fn append_places_source_after_prefix(
                a in proptest::collection::vec(any::<u8>(), 1..300),
                b in proptest::collection::vec(any::<u8>(), 1..300),
            ) {
                let mut left = ByteBuffer::from_slice(&a);
                let right = ByteBuffer::from_slice(&b);
                left.append(&right);
                prop_assert_eq!(left.size(), a.len() + b.len());
                prop_assert_eq!(left.read(0, a.len()), a.as_slice());
                prop_assert_eq!(left.read(a.len(), b.len()), b.as_slice());
            }
        }
    }
}
