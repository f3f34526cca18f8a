//! Point-in-time snapshot of the queue.

use super::Fragment;
use std::time::Duration;

/// Immutable view of the queue taken at one instant.
///
/// Holds the run of *leading* resolved fragments (stopping at the first
/// slot that is pending or errored) and whether the producer has finished.
#[derive(Debug, Clone, Default)]
pub struct QueueState {
    resolved: Vec<Fragment>,
    completed: bool,
}

impl QueueState {
    pub(crate) const fn new(resolved: Vec<Fragment>, completed: bool) -> Self {
        Self {
            resolved,
            completed,
        }
    }

    /// The leading resolved fragments, in order.
    pub fn resolved(&self) -> &[Fragment] {
        &self.resolved
    }

    /// Number of leading resolved fragments.
    #[inline]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Whether the producer has finished writing.
    #[inline]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Index of the most recently resolved fragment, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.resolved.len().checked_sub(1)
    }

    /// Number of resolved fragments after the one at `index`.
    ///
    /// Negative when the fragment at `index` is not resolved yet.
    #[allow(clippy::cast_possible_wrap)]
    pub fn remaining_after(&self, index: usize) -> isize {
        self.resolved.len() as isize - index as isize - 1
    }

    /// Time between the first and the latest resolved fragment.
    pub fn elapsed(&self) -> Duration {
        match (self.resolved.first(), self.resolved.last()) {
            (Some(first), Some(last)) => last.arrived_at().saturating_duration_since(first.arrived_at()),
            _ => Duration::ZERO,
        }
    }

    /// Total grapheme count across the resolved fragments.
    pub fn total_length(&self) -> usize {
        self.resolved.iter().map(Fragment::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_state_aggregates() {
        let start = Instant::now();
        let state = QueueState::new(
            vec![
                Fragment::with_arrival(0, "abc", start),
                Fragment::with_arrival(1, "de", start + Duration::from_millis(40)),
            ],
            false,
        );

        assert_eq!(state.resolved_count(), 2);
        assert_eq!(state.last_index(), Some(1));
        assert_eq!(state.total_length(), 5);
        assert_eq!(state.elapsed(), Duration::from_millis(40));
        assert_eq!(state.remaining_after(0), 1);
        assert_eq!(state.remaining_after(1), 0);
        assert_eq!(state.remaining_after(2), -1);
    }

    #[test]
    fn test_empty_state() {
        let state = QueueState::default();
        assert_eq!(state.last_index(), None);
        assert_eq!(state.elapsed(), Duration::ZERO);
        assert_eq!(state.total_length(), 0);
        assert!(!state.is_completed());
    }
}
