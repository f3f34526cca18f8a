//! `Typewriter`: composes strategies into a runnable pipeline.

use super::{pipe_source, schedule, PipeStream};
use crate::error::Result;
use crate::queue::Queue;
use crate::strategy::{Strategy, StrategyContext};
use futures::stream::{BoxStream, Stream};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Output of a pipeline: paced text pieces.
pub type TypewriterStream = BoxStream<'static, Result<String>>;

/// An ordered chain of strategies.
///
/// The same `Typewriter` can start any number of pipelines; each call to
/// [`Typewriter::pipe`] gets a fresh queue.
///
/// # Example
///
/// ```rust,ignore
/// let typewriter = Typewriter::new()
///     .with(to_character())
///     .with(slow_last_chunk(SlowLastChunkOptions::default()));
///
/// let mut pieces = typewriter.pipe(llm_tokens);
/// while let Some(piece) = pieces.next().await {
///     print!("{}", piece?);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl Typewriter {
    /// Create a pipeline with no strategies (pieces equal fragments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline from an existing strategy list.
    pub fn from_strategies(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// Append a strategy to the chain.
    #[must_use]
    pub fn with(self, strategy: impl Strategy + 'static) -> Self {
        self.with_shared(Arc::new(strategy))
    }

    /// Append a shared strategy to the chain.
    #[must_use]
    pub fn with_shared(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// The configured strategies, in order.
    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }

    /// Build the unscheduled item stream reading from `queue`.
    pub fn compose(&self, queue: &Queue) -> PipeStream {
        let context = StrategyContext::new(queue.clone());
        self.strategies
            .iter()
            .fold(pipe_source(queue), |stream, strategy| {
                strategy.apply(stream, context.clone())
            })
    }

    /// Start a pipeline over `source`.
    ///
    /// The producer is spawned onto the current Tokio runtime and drains
    /// `source` independently of how fast the returned stream is read. It
    /// is not cancelled if the stream is dropped early.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn pipe<S, T, E>(&self, source: S) -> TypewriterStream
    where
        S: Stream<Item = std::result::Result<T, E>> + Send + 'static,
        T: Into<String> + Send + 'static,
        E: Display + Send + 'static,
    {
        let queue = Queue::new();
        let producer = queue.clone();
        tokio::spawn(async move { producer.consume(source).await });

        debug!(
            strategies = ?self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "typewriter pipeline started"
        );
        schedule(self.compose(&queue))
    }
}

/// Start a pipeline over `source` with the given strategies.
///
/// Shorthand for `Typewriter::from_strategies(strategies).pipe(source)`.
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime.
pub fn create_typewriter_pipeline<S, T, E>(
    source: S,
    strategies: Vec<Arc<dyn Strategy>>,
) -> TypewriterStream
where
    S: Stream<Item = std::result::Result<T, E>> + Send + 'static,
    T: Into<String> + Send + 'static,
    E: Display + Send + 'static,
{
    Typewriter::from_strategies(strategies).pipe(source)
}
