//! Fragment: one text unit handed off by the upstream source.

use std::sync::Arc;
use tokio::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

/// A fragment of upstream text, identified by its arrival order.
///
/// Cloning is cheap: the text is shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Position in the upstream sequence, starting at 0.
    index: usize,
    /// The fragment text.
    text: Arc<str>,
    /// Length in grapheme clusters, computed once at arrival.
    length: usize,
    /// When the producer wrote this fragment into the queue.
    arrived_at: Instant,
}

impl Fragment {
    /// Create a fragment stamped with the current time.
    pub fn new(index: usize, text: impl Into<Arc<str>>) -> Self {
        Self::with_arrival(index, text, Instant::now())
    }

    /// Create a fragment with an explicit arrival time.
    pub fn with_arrival(index: usize, text: impl Into<Arc<str>>, arrived_at: Instant) -> Self {
        let text = text.into();
        let length = text.graphemes(true).count();
        Self {
            index,
            text,
            length,
            arrived_at,
        }
    }

    /// Position of this fragment in the upstream sequence.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The fragment text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the fragment text.
    #[inline]
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Number of grapheme clusters in the text.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Check if the fragment carries no text.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Time the fragment was written into the queue.
    #[inline]
    pub const fn arrived_at(&self) -> Instant {
        self.arrived_at
    }
}
