//! Backpressure-aware pacing.
//!
//! Looks at how many resolved fragments sit ahead of the one being emitted.
//! The further behind the output is, the shorter the delay:
//!
//! | Backlog | Latency |
//! |---------|---------|
//! | queue completed, or ≥ 2 fragments ahead | `flush_interval`, rest of fragment merged into one piece |
//! | 1 fragment ahead | `eager_interval` |
//! | caught up | unchanged |

use super::{Strategy, StrategyContext};
use crate::pipeline::PipeStream;
use futures::StreamExt;
use std::pin::Pin;
use std::time::Duration;

/// Options for [`Eager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EagerOptions {
    /// Latency when exactly one fragment is waiting.
    pub eager_interval: Duration,
    /// Latency when flushing.
    pub flush_interval: Duration,
}

impl EagerOptions {
    /// Options with the given eager interval and a zero flush interval.
    pub const fn new(eager_interval: Duration) -> Self {
        Self {
            eager_interval,
            flush_interval: Duration::ZERO,
        }
    }

    /// Set the flush interval.
    #[must_use]
    pub const fn with_flush_interval(mut self, flush_interval: Duration) -> Self {
        self.flush_interval = flush_interval;
        self
    }
}

/// Pacing decision for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pacing {
    /// Far behind: merge the rest of the fragment and use this latency.
    Flush(Duration),
    /// Slightly behind.
    Eager(Duration),
    /// Caught up: leave the latency to other stages.
    Keep,
}

/// Decide pacing for an item of `fragment_index`, given how many leading
/// fragments are resolved and whether the producer has finished.
fn pacing(resolved: usize, completed: bool, fragment_index: usize, options: &EagerOptions) -> Pacing {
    let ahead = resolved.saturating_sub(fragment_index + 1);
    if completed || ahead >= 2 {
        Pacing::Flush(options.flush_interval)
    } else if ahead == 1 {
        Pacing::Eager(options.eager_interval)
    } else {
        Pacing::Keep
    }
}

/// Shrinks latency when the producer is running ahead of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eager {
    options: EagerOptions,
}

/// Create an [`Eager`] strategy.
pub const fn eager(options: EagerOptions) -> Eager {
    Eager { options }
}

impl Strategy for Eager {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn apply(&self, input: PipeStream, context: StrategyContext) -> PipeStream {
        let options = self.options;
        async_stream::try_stream! {
            let mut input = input.peekable();
            while let Some(item) = input.next().await {
                let mut item = item?;
                let index = item.fragment_index();

                let pace = pacing(context.resolved_count(), context.is_completed(), index, &options);
                match pace {
                    Pacing::Flush(latency) => {
                        // Pieces of a resolved fragment are available without
                        // waiting on the producer.
                        loop {
                            match Pin::new(&mut input).peek().await {
                                Some(Ok(next)) if next.fragment_index() == index => {}
                                _ => break,
                            }
                            if let Some(Ok(next)) = input.next().await {
                                item.value.push_str(&next.value);
                            }
                        }
                        item.latency = latency;
                    }
                    Pacing::Eager(latency) => item.latency = latency,
                    Pacing::Keep => {}
                }

                yield item;
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipe_source;
    use crate::strategy::test_support::{queue_with, values};
    use crate::strategy::{linear, to_character};

    const EAGER: Duration = Duration::from_millis(10);
    const DEFAULT: Duration = Duration::from_millis(40);

    async fn run_chain(queue: &crate::Queue, limit: usize) -> Vec<crate::PipeItem> {
        let context = StrategyContext::new(queue.clone());
        let stream = pipe_source(queue);
        let stream = to_character().apply(stream, context.clone());
        let stream = linear(DEFAULT).apply(stream, context.clone());
        let stream = eager(EagerOptions::new(EAGER)).apply(stream, context);
        stream.take(limit).map(Result::unwrap).collect().await
    }

    #[test]
    fn test_pacing_table() {
        let options = EagerOptions::new(EAGER).with_flush_interval(Duration::from_millis(1));
        let queue = queue_with(&["a", "b", "c"], false);
        let resolved = queue.resolved_count();

        assert_eq!(pacing(resolved, false, 0, &options), Pacing::Flush(Duration::from_millis(1)));
        assert_eq!(pacing(resolved, false, 1, &options), Pacing::Eager(EAGER));
        assert_eq!(pacing(resolved, false, 2, &options), Pacing::Keep);

        queue.complete();
        assert_eq!(
            pacing(queue.resolved_count(), queue.is_completed(), 2, &options),
            Pacing::Flush(Duration::from_millis(1))
        );
    }

    #[tokio::test]
    async fn test_flush_merges_rest_of_fragment() {
        let queue = queue_with(&["Hello", "B", "C"], false);
        let items = run_chain(&queue, 1).await;

        assert_eq!(values(&items), vec!["Hello"]);
        assert_eq!(items[0].latency, Duration::ZERO);
        assert_eq!(items[0].offset, 0);
    }

    #[tokio::test]
    async fn test_eager_then_default() {
        let queue = queue_with(&["ab", "cd"], false);
        let items = run_chain(&queue, 4).await;

        assert_eq!(values(&items), vec!["a", "b", "c", "d"]);
        assert_eq!(items[0].latency, EAGER);
        assert_eq!(items[1].latency, EAGER);
        assert_eq!(items[2].latency, DEFAULT);
        assert_eq!(items[3].latency, DEFAULT);
    }

    #[tokio::test]
    async fn test_completed_queue_flushes_everything() {
        let queue = queue_with(&["A", "BC", "D"], true);
        let items = run_chain(&queue, usize::MAX).await;

        assert_eq!(values(&items), vec!["A", "BC", "D"]);
        assert!(items.iter().all(|item| item.latency.is_zero()));
    }

    #[tokio::test]
    async fn test_flush_stops_before_failure() {
        let queue = queue_with(&["ab"], false);
        queue.error(crate::TypewriterError::upstream("bar"));
        queue.complete();

        let context = StrategyContext::new(queue.clone());
        let stream = to_character().apply(pipe_source(&queue), context.clone());
        let output: Vec<_> = eager(EagerOptions::new(EAGER)).apply(stream, context).collect().await;

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].as_ref().unwrap().value, "ab");
        assert_eq!(output[1], Err(crate::TypewriterError::upstream("bar")));
    }
}
