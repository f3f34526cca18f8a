//! Pipeline benchmark: queue throughput and a zero-latency strategy chain.
//!
//! Target: per-character pacing overhead well below a display frame

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use futures::stream::{self, StreamExt};
use std::convert::Infallible;
use tokio::runtime::Runtime;
use typewriter::strategy::{eager, slow_last_chunk, to_character, EagerOptions, SlowLastChunkOptions};
use typewriter::{Queue, Typewriter};

fn fragments(count: usize) -> Vec<Result<String, Infallible>> {
    (0..count).map(|i| Ok(format!("fragment {i} of text, "))).collect()
}

fn queue_fill_and_drain(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("queue");

    for count in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("fill_drain", count), &count, |b, &count| {
            b.to_async(&rt).iter(|| async move {
                let queue = Queue::new();
                queue.consume(stream::iter(fragments(count))).await;
                black_box(queue.fragments().count().await)
            });
        });
    }
    group.finish();
}

fn queue_state_snapshot(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let queue = Queue::new();
    rt.block_on(queue.consume(stream::iter(fragments(1_000))));

    c.bench_function("queue_state_1k", |b| {
        b.iter(|| black_box(queue.state().resolved_count()));
    });
}

fn character_chain(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let typewriter = Typewriter::new()
        .with(to_character())
        .with(slow_last_chunk(SlowLastChunkOptions::default()))
        .with(eager(EagerOptions::default()));

    c.bench_function("character_chain_100_fragments", |b| {
        b.to_async(&rt).iter(|| {
            let typewriter = typewriter.clone();
            async move {
                let queue = Queue::new();
                queue.consume(stream::iter(fragments(100))).await;
                black_box(typewriter.compose(&queue).count().await)
            }
        });
    });
}

criterion_group!(benches, queue_fill_and_drain, queue_state_snapshot, character_chain);
criterion_main!(benches);
