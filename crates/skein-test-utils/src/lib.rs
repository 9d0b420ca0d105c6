//! Test utilities and fixtures for Skein development.
//!
//! Provides element reference helpers, a recording [`Disposer`]
//! ([`DisposeLog`]), and chain-consistency assertions for
//! [`LinkedList`] that only use the list's public structural API.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::{Arc, Mutex, PoisonError};

use skein_core::{Disposer, ElementRef};
use skein_list::LinkedList;

/// Element reference for a non-zero word.
///
/// # Panics
///
/// Panics on `0`, which is the reserved null word.
pub fn r(word: u64) -> ElementRef {
    ElementRef::new(word).expect("test reference words must be non-zero")
}

/// References `1..=n`, in order.
pub fn refs(n: usize) -> Vec<ElementRef> {
    (1..=n as u64).map(r).collect()
}

/// Records every element handed to its disposers, in call order.
///
/// Cloning shares the underlying log, so a clone can be moved into a
/// worker thread while the test keeps inspecting the original.
#[derive(Clone, Default)]
pub struct DisposeLog {
    entries: Arc<Mutex<Vec<ElementRef>>>,
}

impl DisposeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A disposer that appends to this log.
    pub fn disposer(&self) -> Disposer {
        let entries = Arc::clone(&self.entries);
        Box::new(move |data| {
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(data);
        })
    }

    /// Snapshot of disposed elements in disposal order.
    pub fn disposed(&self) -> Vec<ElementRef> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of disposer invocations so far.
    pub fn count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Assert the doubly-linked invariants of `list` through its public API.
///
/// Checks `next(prev(n)) == n` and `prev(next(n)) == n` for every node,
/// that the head has no predecessor and the tail no successor, and that
/// `len()` equals the number of nodes reachable from the head.
pub fn assert_chain_consistent(list: &LinkedList) {
    let Some(first) = list.first() else {
        assert!(list.is_empty(), "empty chain but len() = {}", list.len());
        assert_eq!(list.last(), None, "empty chain has a tail");
        return;
    };
    assert_eq!(list.prev(first), None, "head {first} has a predecessor");

    let mut current = first;
    let mut reachable = 1usize;
    while let Some(next) = list.next(current) {
        assert_eq!(
            list.prev(next),
            Some(current),
            "back-link of {next} does not name {current}"
        );
        reachable += 1;
        assert!(
            reachable <= list.len(),
            "more than len() = {} nodes reachable; chain has a cycle",
            list.len()
        );
        current = next;
    }
    assert_eq!(list.last(), Some(current), "tail is not the last reachable node");
    assert_eq!(reachable, list.len(), "len() disagrees with reachable nodes");
}

/// Collect the chain head-to-tail by walking node handles.
pub fn chain_words(list: &LinkedList) -> Vec<u64> {
    let mut out = Vec::with_capacity(list.len());
    let mut current = list.first();
    while let Some(handle) = current {
        out.push(list.data(handle).get());
        current = list.next(handle);
    }
    out
}
