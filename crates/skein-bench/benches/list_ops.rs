//! Criterion micro-benchmarks for the list containers.

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skein_bench::{make_index, make_linked, make_refs};
use skein_sync::AsyncLinkedList;

/// Benchmark: Append 10K references to a fresh linked list.
fn bench_linked_append_10k(c: &mut Criterion) {
    let refs = make_refs(10_000);
    c.bench_function("linked_append_10k", |b| {
        b.iter(|| {
            let mut list = make_linked(0);
            for &data in &refs {
                list.append(data);
            }
            black_box(list.len());
        });
    });
}

/// Benchmark: Remove every other node of a 10K list by handle.
fn bench_linked_remove_alternate_10k(c: &mut Criterion) {
    c.bench_function("linked_remove_alternate_10k", |b| {
        b.iter(|| {
            let mut list = make_linked(10_000);
            let mut current = list.first();
            while let Some(h) = current {
                let after = list.next(h);
                list.remove_node(h);
                current = after.and_then(|n| list.next(n));
            }
            black_box(list.len());
        });
    });
}

/// Benchmark: Full cursor traversal over a 10K index list.
fn bench_index_iterate_10k(c: &mut Criterion) {
    let list = make_index(10_000);
    c.bench_function("index_iterate_10k", |b| {
        b.iter(|| {
            let sum: u64 = list.iter().map(|d| d.get()).sum();
            black_box(sum);
        });
    });
}

/// Benchmark: 4 threads appending 1K references each to a shared list.
fn bench_async_contended_append_4x1k(c: &mut Criterion) {
    let refs = Arc::new(make_refs(4_000));
    c.bench_function("async_contended_append_4x1k", |b| {
        b.iter(|| {
            let list = Arc::new(AsyncLinkedList::new());
            let workers: Vec<_> = (0..4)
                .map(|t| {
                    let list = Arc::clone(&list);
                    let refs = Arc::clone(&refs);
                    thread::spawn(move || {
                        for &data in &refs[t * 1000..(t + 1) * 1000] {
                            list.append(data);
                        }
                    })
                })
                .collect();
            for w in workers {
                w.join().unwrap();
            }
            black_box(list.len());
        });
    });
}

criterion_group!(
    benches,
    bench_linked_append_10k,
    bench_linked_remove_alternate_10k,
    bench_index_iterate_10k,
    bench_async_contended_append_4x1k
);
criterion_main!(benches);
