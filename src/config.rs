//! Declarative strategy configuration.
//!
//! A [`TypewriterConfig`] describes a strategy chain as data, so hosts can
//! load it from JSON or TOML. Durations are whole milliseconds.
//!
//! ```json
//! {
//!   "strategies": [
//!     { "type": "to_character" },
//!     { "type": "slow_last_chunk", "default_latency_per_character_ms": 20 },
//!     { "type": "eager", "eager_interval_ms": 10 }
//!   ]
//! }
//! ```
//!
//! Custom segmentation functions cannot be expressed as data; build those
//! chains with [`Typewriter::with`](crate::Typewriter::with).

use crate::error::{Result, TypewriterError};
use crate::pipeline::Typewriter;
use crate::strategy::{
    eager, linear, pass_through, slow_last_chunk, to_character, to_word, EagerOptions,
    SlowLastChunkOptions, Strategy, ToWordOptions,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One strategy and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Identity.
    PassThrough,
    /// Fixed latency on every item.
    Linear {
        /// Latency in milliseconds.
        interval_ms: u64,
    },
    /// Split into characters.
    ToCharacter,
    /// Split into words.
    ToWord {
        /// Locale identifier, e.g. `en` or `zh-Hans`.
        #[serde(default)]
        locale: Option<String>,
    },
    /// Backpressure-aware pacing.
    Eager {
        /// Latency when one fragment is waiting.
        eager_interval_ms: u64,
        /// Latency when flushing.
        #[serde(default)]
        flush_interval_ms: u64,
    },
    /// Smoothing for the newest fragment.
    SlowLastChunk {
        /// Per-character latency without arrival history.
        #[serde(default)]
        default_latency_per_character_ms: u64,
    },
}

impl StrategyConfig {
    /// Build the strategy this entry describes.
    pub fn build(&self) -> Result<Arc<dyn Strategy>> {
        let strategy: Arc<dyn Strategy> = match self {
            Self::PassThrough => Arc::new(pass_through()),
            Self::Linear { interval_ms } => Arc::new(linear(Duration::from_millis(*interval_ms))),
            Self::ToCharacter => Arc::new(to_character()),
            Self::ToWord { locale } => {
                let locale = locale.clone().ok_or_else(|| {
                    TypewriterError::invalid_config("to_word requires a locale or a segment function")
                })?;
                Arc::new(to_word(ToWordOptions::Locale(locale))?)
            }
            Self::Eager {
                eager_interval_ms,
                flush_interval_ms,
            } => Arc::new(eager(
                EagerOptions::new(Duration::from_millis(*eager_interval_ms))
                    .with_flush_interval(Duration::from_millis(*flush_interval_ms)),
            )),
            Self::SlowLastChunk {
                default_latency_per_character_ms,
            } => Arc::new(slow_last_chunk(SlowLastChunkOptions {
                default_latency_per_character: Duration::from_millis(
                    *default_latency_per_character_ms,
                ),
            })),
        };
        Ok(strategy)
    }
}

/// An ordered strategy chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterConfig {
    /// Strategies applied left to right.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl TypewriterConfig {
    /// Validate every entry and build the pipeline.
    pub fn build(&self) -> Result<Typewriter> {
        let strategies = self
            .strategies
            .iter()
            .map(StrategyConfig::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Typewriter::from_strategies(strategies))
    }
}
