//! Shared workload builders for the Skein benchmarks.

use skein_core::ElementRef;
use skein_list::{IndexList, LinkedList};

/// References `1..=n`.
pub fn make_refs(n: usize) -> Vec<ElementRef> {
    (1..=n as u64).filter_map(ElementRef::new).collect()
}

/// A linked list holding `1..=n` in order.
pub fn make_linked(n: usize) -> LinkedList {
    let mut list = LinkedList::new();
    for data in make_refs(n) {
        list.append(data);
    }
    list
}

/// An index list holding `1..=n` in order.
pub fn make_index(n: usize) -> IndexList {
    let mut list = IndexList::new();
    for data in make_refs(n) {
        list.push(data);
    }
    list
}
