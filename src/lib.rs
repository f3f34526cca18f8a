//! # Flywheel Typewriter
//!
//! Adaptive typewriter pacing for streamed LLM text in Agentic CLIs.
//!
//! Text-generation services deliver output in bursty fragments. This crate
//! re-paces such a stream into smaller pieces (characters or words), each
//! released after a computed delay, while staying responsive to the real
//! arrival rate: when the source runs ahead the delays shrink, and when it
//! stalls or ends the buffered text flushes without waiting.
//!
//! ## Core Concepts
//!
//! - **Queue**: ordered buffer between the producer task draining the source
//!   and the consumer, which may look ahead of the producer
//! - **Strategies**: composable stream transforms that split pieces and
//!   rewrite their latency
//! - **Delay scheduler**: honors each piece's latency before the next one
//! - **Lossless**: pieces always concatenate to exactly the source text
//!
//! ## Example
//!
//! ```rust,ignore
//! use typewriter::strategy::{eager, slow_last_chunk, to_character, EagerOptions, SlowLastChunkOptions};
//! use typewriter::Typewriter;
//!
//! let mut pieces = Typewriter::new()
//!     .with(to_character())
//!     .with(slow_last_chunk(SlowLastChunkOptions::default()))
//!     .with(eager(EagerOptions::new(Duration::from_millis(10))))
//!     .pipe(llm_tokens);
//!
//! while let Some(piece) = pieces.next().await {
//!     print!("{}", piece?);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod presets;
pub mod queue;
pub mod strategy;
pub mod terminal;

// Re-exports for convenience
pub use actor::{TypewriterActor, TypewriterEvent};
pub use config::{StrategyConfig, TypewriterConfig};
pub use error::{Result, TypewriterError};
pub use pipeline::{create_typewriter_pipeline, PipeItem, PipeStream, Typewriter, TypewriterStream};
pub use queue::{Fragment, Queue, QueueState};
pub use strategy::{Strategy, StrategyContext};
pub use terminal::TerminalWriter;
