//! The [`AsyncLinkedList`] decorator and its per-step cursor.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use skein_core::{Disposer, ElementRef, ListConfig, ListError, ListId};
use skein_list::{Cursor, LinkedList, NodeHandle};

/// A [`LinkedList`] shared across threads behind a single mutex.
///
/// The wrapped list is exclusively owned: once wrapped, it is reachable
/// only through this type, and only while the lock is held.
pub struct AsyncLinkedList {
    id: ListId,
    inner: Mutex<LinkedList>,
}

// Compile-time assertion: AsyncLinkedList must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<AsyncLinkedList>();
};

impl AsyncLinkedList {
    /// Create an empty list without a disposer.
    pub fn new() -> Self {
        Self::from_list(LinkedList::new())
    }

    /// Create an empty list whose removed elements are handed to `disposer`.
    ///
    /// The disposer runs with the lock held and must not call back into
    /// this list.
    pub fn with_disposer(disposer: Disposer) -> Self {
        Self::from_list(LinkedList::with_disposer(disposer))
    }

    /// Create an empty list with the reservations from `config`.
    pub fn from_config(config: &ListConfig, disposer: Option<Disposer>) -> Self {
        Self::from_list(LinkedList::from_config(config, disposer))
    }

    /// Take ownership of an existing list.
    pub fn from_list(list: LinkedList) -> Self {
        Self {
            id: list.id(),
            inner: Mutex::new(list),
        }
    }

    /// Unwrap the inner list.
    pub fn into_inner(self) -> LinkedList {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The wrapped list's instance id.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Number of elements at the moment of the call.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the list is empty at the moment of the call.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Add `data` at the tail.
    pub fn append(&self, data: ElementRef) -> NodeHandle {
        self.lock().append(data)
    }

    /// Add `data` at the head.
    pub fn prepend(&self, data: ElementRef) -> NodeHandle {
        self.lock().prepend(data)
    }

    /// Remove the first node holding `data`, if any.
    pub fn remove(&self, data: ElementRef) -> bool {
        self.lock().remove(data)
    }

    /// Remove `handle`'s node, disposing its element.
    ///
    /// # Panics
    ///
    /// Panics if the node has already been removed (possibly by another
    /// thread) or belongs to another list. Prefer
    /// [`try_remove_node`](Self::try_remove_node) when other threads may
    /// remove the same node.
    pub fn remove_node(&self, handle: NodeHandle) {
        self.lock().remove_node(handle);
    }

    /// Checked form of [`remove_node`](Self::remove_node).
    pub fn try_remove_node(&self, handle: NodeHandle) -> Result<(), ListError> {
        self.lock().try_remove_node(handle)
    }

    /// Whether `handle` still refers to a node in this list.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.lock().contains(handle)
    }

    /// Remove every node, disposing each element.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// `target` itself if some node holds it (identity comparison).
    pub fn find_value(&self, target: ElementRef) -> Option<ElementRef> {
        self.lock().find_value(target)
    }

    /// First node holding `target` (identity comparison).
    ///
    /// The handle may go stale as soon as the lock is released.
    pub fn find_node(&self, target: ElementRef) -> Option<NodeHandle> {
        self.lock().find_node(target)
    }

    /// Start a fine-grained traversal at the current head.
    ///
    /// The lock is held only long enough to read the head.
    pub fn begin_iterate(&self) -> AsyncCursor<'_> {
        let cursor = self.lock().begin_iterate();
        AsyncCursor { list: self, cursor }
    }

    /// All elements head-to-tail, read under a single lock acquisition.
    pub fn snapshot(&self) -> Vec<ElementRef> {
        self.lock().iter().collect()
    }

    /// Run `f` with exclusive access to the wrapped list.
    ///
    /// Everything `f` does is one critical section. `f` must not call
    /// back into this `AsyncLinkedList`.
    pub fn with_list<R>(&self, f: impl FnOnce(&mut LinkedList) -> R) -> R {
        f(&mut self.lock())
    }

    // Contract checks run before any structural change, so a poisoned
    // lock still guards a consistent list.
    fn lock(&self) -> MutexGuard<'_, LinkedList> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::debug!(list = %self.id, "recovering poisoned list lock");
            poisoned.into_inner()
        })
    }
}

impl Default for AsyncLinkedList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AsyncLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncLinkedList")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A traversal over an [`AsyncLinkedList`] that locks once per step.
///
/// Created by [`AsyncLinkedList::begin_iterate`]; dropping it ends the
/// traversal. Implements [`Iterator`], so `for data in list.begin_iterate()`
/// works, but the sequence observed is not a snapshot.
pub struct AsyncCursor<'a> {
    list: &'a AsyncLinkedList,
    cursor: Cursor,
}

impl AsyncCursor<'_> {
    /// Rewind to the current head.
    pub fn reset(&mut self) {
        self.list.lock().reset_iterator(&mut self.cursor);
    }

    /// Insert `data` after the cursor's position (at the tail when
    /// exhausted), as one critical section.
    pub fn insert(&self, data: ElementRef) -> NodeHandle {
        self.list.lock().insert(&self.cursor, data)
    }

    /// Number of elements yielded since creation or the last reset.
    pub fn index(&self) -> u64 {
        self.cursor.index()
    }
}

impl Iterator for AsyncCursor<'_> {
    type Item = ElementRef;

    fn next(&mut self) -> Option<ElementRef> {
        self.list.lock().iterate(&mut self.cursor)
    }
}

impl fmt::Debug for AsyncCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncCursor")
            .field("list", &self.list.id)
            .field("cursor", &self.cursor)
            .finish()
    }
}
