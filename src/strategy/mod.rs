//! Strategies: composable transforms over the pipe item stream.
//!
//! Every strategy consumes the stream produced by the previous stage and
//! returns a new one, optionally splitting items into smaller pieces
//! and/or rewriting their latency. Strategies compose left to right and
//! end in the [delay scheduler](crate::pipeline::schedule).
//!
//! | Strategy | Effect |
//! |----------|--------|
//! | [`PassThrough`] | Identity |
//! | [`Linear`] | Fixed latency on every item |
//! | [`ToCharacter`] | One item per grapheme cluster |
//! | [`ToWord`] | One item per word segment |
//! | [`Eager`] | Shrinks latency when the producer runs ahead |
//! | [`SlowLastChunk`] | Spreads the expected wait over the newest fragment |
//!
//! # Example
//!
//! ```rust,ignore
//! use typewriter::{Typewriter, strategy::{to_character, eager, EagerOptions}};
//!
//! let typewriter = Typewriter::new()
//!     .with(to_character())
//!     .with(eager(EagerOptions::new(Duration::from_millis(10))));
//! ```

mod character;
mod eager;
mod linear;
mod pass_through;
mod slow_last_chunk;
mod word;

pub use character::{to_character, ToCharacter};
pub use eager::{eager, Eager, EagerOptions};
pub use linear::{linear, Linear};
pub use pass_through::{pass_through, PassThrough};
pub use slow_last_chunk::{slow_last_chunk, SlowLastChunk, SlowLastChunkOptions};
pub use word::{to_word, Segment, ToWord, ToWordOptions, UnicodeWordSegmenter};

use crate::pipeline::PipeStream;
use crate::queue::{Queue, QueueState};
use std::fmt;

/// Read access to the queue for strategies.
#[derive(Debug, Clone)]
pub struct StrategyContext {
    queue: Queue,
}

impl StrategyContext {
    /// Create a context reading from `queue`.
    pub const fn new(queue: Queue) -> Self {
        Self { queue }
    }

    /// Take a fresh snapshot of the queue.
    pub fn queue_state(&self) -> QueueState {
        self.queue.state()
    }

    /// Number of leading resolved fragments, without taking a snapshot.
    pub fn resolved_count(&self) -> usize {
        self.queue.resolved_count()
    }

    /// Whether the producer has finished.
    pub fn is_completed(&self) -> bool {
        self.queue.is_completed()
    }
}

/// A stage of the typewriter pipeline.
pub trait Strategy: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Wrap `input` into the stream this strategy produces.
    ///
    /// Implementations must keep item order and must not drop or duplicate
    /// text.
    fn apply(&self, input: PipeStream, context: StrategyContext) -> PipeStream;
}
