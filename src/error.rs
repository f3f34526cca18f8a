//! Error types for the typewriter pipeline.

use thiserror::Error;

/// Result type alias for typewriter operations.
pub type Result<T> = std::result::Result<T, TypewriterError>;

/// Errors raised by the queue, the strategies and the pipeline.
///
/// The type is `Clone` because a single failure recorded in the queue is
/// handed to every consumer that reaches the failing index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypewriterError {
    /// The upstream fragment source failed.
    #[error("upstream source failed: {reason}")]
    Upstream {
        /// Failure reason reported by the source.
        reason: String,
    },

    /// The producer task went away while a consumer was waiting on a slot.
    #[error("producer stopped before fragment {index} was written")]
    ProducerGone {
        /// Index of the slot the consumer was waiting on.
        index: usize,
    },

    /// A strategy was configured incorrectly.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A word segmenter returned pieces that do not rebuild its input.
    #[error("segmenter output does not match fragment {fragment} at byte offset {offset}")]
    Segmentation {
        /// Index of the fragment being segmented.
        fragment: usize,
        /// Byte offset where the mismatch was detected.
        offset: usize,
    },

    /// Writing paced output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The blocking bridge could not start its worker thread.
    #[error("typewriter actor failed: {0}")]
    Actor(String),
}

impl TypewriterError {
    /// Build an upstream error from anything printable.
    pub fn upstream(reason: impl std::fmt::Display) -> Self {
        Self::Upstream {
            reason: reason.to_string(),
        }
    }

    /// Build a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
