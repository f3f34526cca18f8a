//! Message types sent by the typewriter actor.

use crate::error::TypewriterError;

/// Event delivered to the synchronous side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// The next paced piece of text.
    Piece(String),
    /// The pipeline failed; no further pieces follow.
    Failed(TypewriterError),
    /// The pipeline finished normally.
    Finished,
}

impl TypewriterEvent {
    /// Check if no further events will follow.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Finished)
    }
}
