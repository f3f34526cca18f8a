//! `PipeItem`: the unit flowing through the strategy chain.

use crate::queue::Fragment;
use std::time::Duration;

/// One piece of text travelling through the pipeline.
///
/// Strategies may split an item into several (keeping the fragment and
/// advancing `offset`) or rewrite its latency, but never reorder items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeItem {
    /// Text of this piece.
    pub value: String,
    /// Byte offset of `value` within the fragment text.
    pub offset: usize,
    /// Delay to honor before the *next* piece is emitted.
    pub latency: Duration,
    /// Fragment this piece came from.
    pub fragment: Fragment,
}

impl PipeItem {
    /// Wrap a whole fragment with zero latency.
    pub fn from_fragment(fragment: Fragment) -> Self {
        Self {
            value: fragment.text().to_string(),
            offset: 0,
            latency: Duration::ZERO,
            fragment,
        }
    }

    /// Derive a piece of the same fragment.
    pub fn piece(&self, value: impl Into<String>, offset: usize, latency: Duration) -> Self {
        Self {
            value: value.into(),
            offset,
            latency,
            fragment: self.fragment.clone(),
        }
    }

    /// Return the same item with a new latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Index of the originating fragment.
    #[inline]
    pub const fn fragment_index(&self) -> usize {
        self.fragment.index()
    }

    /// Text of the fragment that has not been emitted before this item.
    pub fn fragment_remainder(&self) -> &str {
        self.fragment.text().get(self.offset..).unwrap_or_default()
    }
}
