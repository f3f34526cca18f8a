//! Pipeline: source, strategy chain and delay scheduler wired together.
//!
//! # Architecture
//!
//! ```text
//! upstream ──▶ Queue::consume (producer task)
//!                 │
//!                 ▼
//!          Queue::fragments ──▶ pipe_source ──▶ Strategy₁ ──▶ … ──▶ Strategyₙ ──▶ schedule ──▶ pieces
//! ```
//!
//! The producer runs as its own task and is never slowed down by the
//! consumer. The consumer side is a single stream: pulling a piece pulls
//! through every strategy and may park on a pending queue slot or on a
//! scheduled delay.

mod item;
mod scheduler;
mod source;
mod typewriter;

pub use item::PipeItem;
pub use scheduler::schedule;
pub use source::pipe_source;
pub use typewriter::{create_typewriter_pipeline, Typewriter, TypewriterStream};

use crate::error::Result;
use futures::stream::BoxStream;

/// Stream of pipe items passed between strategies.
pub type PipeStream = BoxStream<'static, Result<PipeItem>>;
