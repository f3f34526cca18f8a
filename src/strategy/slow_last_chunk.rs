//! Smoothing for the newest fragment.
//!
//! Once the output catches up with the producer, the last resolved fragment
//! is all there is to show until the next one arrives. Emitting it in one
//! burst and then freezing looks choppy, so this strategy estimates the
//! time until the next fragment from the arrival history and spreads it
//! over the remaining characters of the newest fragment.

use super::{Strategy, StrategyContext};
use crate::pipeline::{PipeItem, PipeStream};
use crate::queue::QueueState;
use futures::StreamExt;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Options for [`SlowLastChunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlowLastChunkOptions {
    /// Per-character latency used while there is no arrival history.
    pub default_latency_per_character: Duration,
}

/// Spreads the expected wait for the next fragment across the characters
/// of the newest resolved fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlowLastChunk {
    options: SlowLastChunkOptions,
}

/// Create a [`SlowLastChunk`] strategy.
pub const fn slow_last_chunk(options: SlowLastChunkOptions) -> SlowLastChunk {
    SlowLastChunk { options }
}

impl SlowLastChunk {
    /// Per-character latency for `item`, which belongs to the newest fragment.
    ///
    /// `expected = (total_size / count) * (total_time / total_size)`, divided
    /// by the characters still to show and rounded up to whole milliseconds.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn latency(&self, state: &QueueState, item: &PipeItem) -> Duration {
        if state.resolved_count() <= 1 {
            return self.options.default_latency_per_character;
        }

        let total_size = state.total_length();
        let remaining = item.fragment_remainder().graphemes(true).count();
        if total_size == 0 || remaining == 0 {
            return Duration::ZERO;
        }

        let total_time = state.elapsed().as_secs_f64() * 1000.0;
        let average_latency_per_character = total_time / total_size as f64;
        let average_chunk_size = total_size as f64 / state.resolved_count() as f64;
        let expected_latency = average_chunk_size * average_latency_per_character;
        let millis = (expected_latency / remaining as f64).ceil();

        if millis.is_finite() && millis > 0.0 {
            Duration::from_millis(millis as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl Strategy for SlowLastChunk {
    fn name(&self) -> &'static str {
        "slow_last_chunk"
    }

    fn apply(&self, input: PipeStream, context: StrategyContext) -> PipeStream {
        let strategy = *self;
        async_stream::try_stream! {
            for await item in input {
                let item = item?;
                let newest = item.fragment_index() + 1;
                if item.value.is_empty() || context.resolved_count() != newest {
                    yield item;
                    continue;
                }

                let latency = strategy.latency(&context.queue_state(), &item);
                for (at, grapheme) in item.value.grapheme_indices(true) {
                    if context.resolved_count() == newest {
                        yield item.piece(grapheme, item.offset + at, latency);
                    } else {
                        // A newer fragment arrived: show the rest at once.
                        yield item.piece(&item.value[at..], item.offset + at, Duration::ZERO);
                        break;
                    }
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::Queue;
    use crate::strategy::test_support::{queue_with, run, values};
    use crate::strategy::to_character;
    use crate::pipeline::pipe_source;

    const T: Duration = Duration::from_millis(100);

    async fn timed_queue(chunks: &[&str], interval: Duration) -> Queue {
        let queue = Queue::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 {
                tokio::time::advance(interval).await;
            }
            queue.put((*chunk).to_string());
        }
        queue
    }

    fn smooth(queue: &Queue, options: SlowLastChunkOptions) -> PipeStream {
        slow_last_chunk(options).apply(pipe_source(queue), StrategyContext::new(queue.clone()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_fragment_is_split() {
        let queue = timed_queue(&["abcd", "efgh"], T).await;
        let items: Vec<_> = smooth(&queue, SlowLastChunkOptions::default())
            .take(5)
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(values(&items), vec!["abcd", "e", "f", "g", "h"]);
        assert_eq!(items[0].latency, Duration::ZERO);
        // 100ms over 8 chars, 4 chars per fragment: 50ms for 4 chars.
        assert!(items[1..].iter().all(|item| item.latency == Duration::from_millis(13)));
        assert_eq!(items[4].offset, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_latency_without_history() {
        let queue = timed_queue(&["ab"], T).await;
        let options = SlowLastChunkOptions {
            default_latency_per_character: Duration::from_millis(7),
        };
        let items: Vec<_> = smooth(&queue, options).take(2).map(Result::unwrap).collect().await;

        assert_eq!(values(&items), vec!["a", "b"]);
        assert!(items.iter().all(|item| item.latency == Duration::from_millis(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_fragment_flushes_remainder() {
        let queue = timed_queue(&["abcd"], T).await;
        let options = SlowLastChunkOptions {
            default_latency_per_character: Duration::from_millis(5),
        };
        let mut stream = smooth(&queue, options);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.value, "a");
        assert_eq!(first.latency, Duration::from_millis(5));

        queue.put("x".into());

        let rest = stream.next().await.unwrap().unwrap();
        assert_eq!(rest.value, "bcd");
        assert_eq!(rest.offset, 1);
        assert_eq!(rest.latency, Duration::ZERO);

        let next = stream.next().await.unwrap().unwrap();
        assert_eq!(next.value, "x");
        assert_eq!(next.fragment_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_converges_to_arrival_rate() {
        let chunks = vec!["abcd"; 20];
        let queue = timed_queue(&chunks, T).await;
        let context = StrategyContext::new(queue.clone());
        let stream = to_character().apply(pipe_source(&queue), context.clone());
        let stream = slow_last_chunk(SlowLastChunkOptions::default()).apply(stream, context);

        let items: Vec<_> = stream.take(80).map(Result::unwrap).collect().await;
        let first_of_last = &items[76];
        assert_eq!(first_of_last.fragment_index(), 19);

        // T / fragment length = 25ms.
        let latency = first_of_last.latency.as_millis();
        assert!((23..=25).contains(&latency), "latency {latency}ms");
    }

    #[test]
    fn test_degenerate_estimates_are_zero() {
        let strategy = slow_last_chunk(SlowLastChunkOptions::default());
        let queue = Queue::new();
        queue.put(String::new());
        queue.put(String::new());
        let state = queue.state();
        let item = PipeItem::from_fragment(state.resolved()[1].clone());

        assert_eq!(strategy.latency(&state, &item), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_empty_newest_fragment_is_kept() {
        let queue = queue_with(&["", "ab", "", "c", ""], true);
        let items = run(&slow_last_chunk(SlowLastChunkOptions::default()), &queue, usize::MAX).await;

        assert_eq!(values(&items), vec!["", "ab", "", "c", ""]);
        assert_eq!(items[4].fragment_index(), 4);
    }
}
