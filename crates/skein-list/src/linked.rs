//! Handle-addressed doubly-linked list.
//!
//! Nodes live in an arena owned by the list and link to each other by
//! slot index. Callers refer to nodes through [`NodeHandle`]s, which
//! carry the owning list's id and the slot generation, so a handle that
//! outlives its node (or wanders to another list) is detected instead of
//! relinking memory that no longer belongs to the chain.

use std::fmt;

use skein_core::{Disposer, ElementRef, ListConfig, ListError, ListId};

use crate::cursor::Cursor;

/// Stable identity of one node in a [`LinkedList`].
///
/// Copyable and cheap. Valid until the node is removed; after that every
/// structural use of the handle is a contract violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) list: ListId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeHandle {
    /// Slot index of the node within its list's arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at the time the node was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeHandle(list={}, slot={}, gen={})",
            self.list, self.index, self.generation
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Node {
    data: ElementRef,
    prev: Option<u32>,
    next: Option<u32>,
}

/// One arena slot. The generation is bumped every time the slot is
/// vacated, which invalidates outstanding handles to it.
#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A doubly-linked list of opaque element references.
///
/// - `append`/`prepend`/`insert`: O(1).
/// - `remove_node`: O(1) given a handle.
/// - `find_node`/`find_value`/`remove`: O(n) identity scan.
///
/// An optional [`Disposer`] takes ownership of each element's data when
/// the element is removed, cleared, or the list is dropped.
///
/// Not internally synchronised.
pub struct LinkedList {
    id: ListId,
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    first: Option<u32>,
    last: Option<u32>,
    count: usize,
    disposer: Option<Disposer>,
}

impl LinkedList {
    /// Create an empty list without a disposer.
    pub fn new() -> Self {
        Self::from_config(&ListConfig::default(), None)
    }

    /// Create an empty list whose removed elements are handed to `disposer`.
    pub fn with_disposer(disposer: Disposer) -> Self {
        Self::from_config(&ListConfig::default(), Some(disposer))
    }

    /// Create an empty list with room for `nodes` nodes before the arena
    /// reallocates.
    pub fn with_capacity(nodes: usize) -> Self {
        let config = ListConfig {
            initial_nodes: nodes,
            ..ListConfig::default()
        };
        Self::from_config(&config, None)
    }

    /// Create an empty list with the arena reservation from `config`.
    pub fn from_config(config: &ListConfig, disposer: Option<Disposer>) -> Self {
        Self {
            id: ListId::next(),
            slots: Vec::with_capacity(config.initial_nodes),
            free_list: Vec::new(),
            first: None,
            last: None,
            count: 0,
            disposer,
        }
    }

    /// This list's instance id.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Number of elements in the chain.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether a disposer is configured.
    pub fn has_disposer(&self) -> bool {
        self.disposer.is_some()
    }

    /// Handle of the head node.
    pub fn first(&self) -> Option<NodeHandle> {
        self.first.map(|idx| self.handle(idx))
    }

    /// Handle of the tail node.
    pub fn last(&self) -> Option<NodeHandle> {
        self.last.map(|idx| self.handle(idx))
    }

    /// Whether `handle` refers to a node currently in this list.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// The element held by `handle`'s node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another list.
    pub fn data(&self, handle: NodeHandle) -> ElementRef {
        self.node(self.expect_resolved(handle, "data")).data
    }

    /// The node following `handle`'s node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another list.
    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let idx = self.expect_resolved(handle, "next");
        self.node(idx).next.map(|n| self.handle(n))
    }

    /// The node preceding `handle`'s node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another list.
    pub fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let idx = self.expect_resolved(handle, "prev");
        self.node(idx).prev.map(|p| self.handle(p))
    }

    /// Add `data` at the tail.
    pub fn append(&mut self, data: ElementRef) -> NodeHandle {
        let idx = self.alloc_node(Node {
            data,
            prev: self.last,
            next: None,
        });
        match self.last {
            Some(last) => self.node_mut(last).next = Some(idx),
            None => self.first = Some(idx),
        }
        self.last = Some(idx);
        self.count += 1;
        self.handle(idx)
    }

    /// Add `data` at the head.
    pub fn prepend(&mut self, data: ElementRef) -> NodeHandle {
        let idx = self.alloc_node(Node {
            data,
            prev: None,
            next: self.first,
        });
        match self.first {
            Some(first) => self.node_mut(first).prev = Some(idx),
            None => self.last = Some(idx),
        }
        self.first = Some(idx);
        self.count += 1;
        self.handle(idx)
    }

    /// Add `data` immediately after `anchor`'s node.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is stale or belongs to another list.
    pub fn insert_after(&mut self, anchor: NodeHandle, data: ElementRef) -> NodeHandle {
        let idx = self.expect_resolved(anchor, "insert_after");
        self.link_after(idx, data)
    }

    /// Add `data` immediately before `anchor`'s node.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is stale or belongs to another list.
    pub fn insert_before(&mut self, anchor: NodeHandle, data: ElementRef) -> NodeHandle {
        let idx = self.expect_resolved(anchor, "insert_before");
        match self.node(idx).prev {
            Some(prev) => self.link_after(prev, data),
            None => self.prepend(data),
        }
    }

    /// Add `data` immediately after the cursor's current position.
    ///
    /// An exhausted cursor (including one whose position node has been
    /// removed) inserts at the tail. The cursor itself does not move, so
    /// the inserted element is the one yielded after the current position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor belongs to another list.
    pub fn insert(&mut self, cursor: &Cursor, data: ElementRef) -> NodeHandle {
        self.expect_own_cursor(cursor, "insert");
        match cursor.position.and_then(|h| self.resolve(h).ok()) {
            Some(idx) => self.link_after(idx, data),
            None => self.append(data),
        }
    }

    /// First node holding `target` (identity comparison).
    pub fn find_node(&self, target: ElementRef) -> Option<NodeHandle> {
        let mut current = self.first;
        while let Some(idx) = current {
            let node = self.node(idx);
            if node.data == target {
                return Some(self.handle(idx));
            }
            current = node.next;
        }
        None
    }

    /// `target` itself if some node holds it, otherwise `None`.
    pub fn find_value(&self, target: ElementRef) -> Option<ElementRef> {
        self.find_node(target).map(|_| target)
    }

    /// Remove the first node holding `data`, if any.
    ///
    /// Returns whether a node was removed. The disposer runs on the
    /// removed element.
    pub fn remove(&mut self, data: ElementRef) -> bool {
        match self.find_node(data) {
            Some(handle) => {
                self.remove_node(handle);
                true
            }
            None => false,
        }
    }

    /// Unlink and release `handle`'s node, disposing its element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or belongs to another list.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if let Err(e) = self.try_remove_node(handle) {
            panic!("LinkedList::remove_node: {e}");
        }
    }

    /// Checked form of [`remove_node`](Self::remove_node).
    pub fn try_remove_node(&mut self, handle: NodeHandle) -> Result<(), ListError> {
        let idx = self.resolve(handle)?;
        let data = self.unlink(idx);
        self.dispose(data);
        Ok(())
    }

    /// Remove every node, disposing each element in chain order.
    pub fn clear(&mut self) {
        while let Some(first) = self.first {
            let data = self.unlink(first);
            self.dispose(data);
        }
    }

    /// Create a cursor positioned at the head.
    pub fn begin_iterate(&self) -> Cursor {
        Cursor::new(self.id, self.first())
    }

    /// Yield the element at the cursor and advance it.
    ///
    /// Returns `None` once the cursor runs off the tail or its position
    /// node has been removed; it keeps returning `None` until reset.
    ///
    /// # Panics
    ///
    /// Panics if the cursor belongs to another list.
    pub fn iterate(&self, cursor: &mut Cursor) -> Option<ElementRef> {
        self.expect_own_cursor(cursor, "iterate");
        let Some(idx) = cursor.position.and_then(|h| self.resolve(h).ok()) else {
            cursor.position = None;
            return None;
        };
        let node = self.node(idx);
        cursor.position = node.next.map(|n| self.handle(n));
        cursor.index += 1;
        Some(node.data)
    }

    /// Rewind the cursor to the current head.
    ///
    /// # Panics
    ///
    /// Panics if the cursor belongs to another list.
    pub fn reset_iterator(&self, cursor: &mut Cursor) {
        self.expect_own_cursor(cursor, "reset_iterator");
        cursor.position = self.first();
        cursor.index = 0;
    }

    /// Finish a traversal, consuming the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor belongs to another list.
    pub fn end_iterate(&self, cursor: Cursor) {
        self.expect_own_cursor(&cursor, "end_iterate");
    }

    /// Borrowing head-to-tail traversal with its own private position.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.first,
            remaining: self.count,
        }
    }

    /// Walk the chain and verify its structural invariants.
    ///
    /// Checks that every node's back-link names its predecessor, that the
    /// tail is the last reachable node, and that the recorded count equals
    /// the number of reachable nodes.
    pub fn check_invariants(&self) -> Result<(), ListError> {
        let mut expected_prev = None;
        let mut current = self.first;
        let mut reachable = 0usize;
        while let Some(idx) = current {
            let node = self
                .slots
                .get(idx as usize)
                .and_then(|s| s.node.as_ref())
                .ok_or(ListError::BrokenLink { index: idx })?;
            if node.prev != expected_prev {
                return Err(ListError::BrokenLink { index: idx });
            }
            reachable += 1;
            if reachable > self.slots.len() {
                // Cycle: more hops than slots.
                return Err(ListError::BrokenLink { index: idx });
            }
            expected_prev = Some(idx);
            current = node.next;
        }
        if self.last != expected_prev {
            return Err(ListError::BrokenLink {
                index: self.last.or(expected_prev).unwrap_or(0),
            });
        }
        if reachable != self.count {
            return Err(ListError::CountMismatch {
                recorded: self.count,
                reachable,
            });
        }
        Ok(())
    }

    fn link_after(&mut self, idx: u32, data: ElementRef) -> NodeHandle {
        let next = self.node(idx).next;
        let new = self.alloc_node(Node {
            data,
            prev: Some(idx),
            next,
        });
        match next {
            Some(n) => self.node_mut(n).prev = Some(new),
            None => self.last = Some(new),
        }
        self.node_mut(idx).next = Some(new);
        self.count += 1;
        self.handle(new)
    }

    /// Detach `idx` from the chain, vacate its slot, and return its data.
    fn unlink(&mut self, idx: u32) -> ElementRef {
        let node = *self.node(idx);
        match (node.prev, node.next) {
            // Sole element.
            (None, None) => {
                self.first = None;
                self.last = None;
            }
            // Head.
            (None, Some(next)) => {
                self.first = Some(next);
                self.node_mut(next).prev = None;
            }
            // Tail.
            (Some(prev), None) => {
                self.last = Some(prev);
                self.node_mut(prev).next = None;
            }
            // Interior.
            (Some(prev), Some(next)) => {
                self.node_mut(prev).next = Some(next);
                self.node_mut(next).prev = Some(prev);
            }
        }
        let slot = &mut self.slots[idx as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        // A wrapped generation would match handles from the slot's first
        // lifetime, so the slot is retired instead of reused.
        if slot.generation != 0 {
            self.free_list.push(idx);
        }
        self.count -= 1;
        node.data
    }

    fn alloc_node(&mut self, node: Node) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize].node = Some(node);
            return idx;
        }
        let idx = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("LinkedList: node arena exceeds u32::MAX slots"));
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        idx
    }

    fn dispose(&mut self, data: ElementRef) {
        if let Some(disposer) = self.disposer.as_mut() {
            disposer(data);
        }
    }

    fn handle(&self, idx: u32) -> NodeHandle {
        NodeHandle {
            list: self.id,
            index: idx,
            generation: self.slots[idx as usize].generation,
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Result<u32, ListError> {
        if handle.list != self.id {
            return Err(ListError::ForeignHandle {
                handle_list: handle.list,
                list: self.id,
            });
        }
        match self.slots.get(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation && slot.node.is_some() => {
                Ok(handle.index)
            }
            _ => Err(ListError::StaleHandle {
                index: handle.index,
                generation: handle.generation,
            }),
        }
    }

    fn expect_resolved(&self, handle: NodeHandle, op: &str) -> u32 {
        match self.resolve(handle) {
            Ok(idx) => idx,
            Err(e) => panic!("LinkedList::{op}: {e}"),
        }
    }

    fn expect_own_cursor(&self, cursor: &Cursor, op: &str) {
        if cursor.list != self.id {
            let e = ListError::ForeignCursor {
                cursor_list: cursor.list,
                list: self.id,
            };
            panic!("LinkedList::{op}: {e}");
        }
    }

    // Linked indices always point at occupied slots.
    fn node(&self, idx: u32) -> &Node {
        self.slots[idx as usize]
            .node
            .as_ref()
            .expect("chain link points at a vacant slot")
    }

    fn node_mut(&mut self, idx: u32) -> &mut Node {
        self.slots[idx as usize]
            .node
            .as_mut()
            .expect("chain link points at a vacant slot")
    }
}

impl Default for LinkedList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LinkedList {
    fn drop(&mut self) {
        if self.disposer.is_some() && self.count > 0 {
            tracing::debug!(list = %self.id, elements = self.count, "disposing linked list");
        }
        self.clear();
    }
}

impl fmt::Debug for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("id", &self.id)
            .field("len", &self.count)
            .field("slots", &self.slots.len())
            .field("has_disposer", &self.disposer.is_some())
            .finish()
    }
}

/// Head-to-tail iterator over a [`LinkedList`], created by
/// [`LinkedList::iter`].
pub struct Iter<'a> {
    list: &'a LinkedList,
    next: Option<u32>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = ElementRef;

    fn next(&mut self) -> Option<ElementRef> {
        let idx = self.next?;
        let node = self.list.node(idx);
        self.next = node.next;
        self.remaining -= 1;
        Some(node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = ElementRef;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
