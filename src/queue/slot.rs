//! Slot: the queue's storage cell at one index.

use super::Fragment;
use crate::error::{Result, TypewriterError};
use futures::future::{FutureExt, Shared};
use tokio::sync::oneshot;

/// Outcome delivered to a consumer waiting on a pending slot.
///
/// `Ok(None)` means the producer finished before writing this index.
pub(crate) type Arrival = Result<Option<Fragment>>;

/// Future a consumer awaits while a slot is pending.
pub(crate) type SlotWaiter = Shared<oneshot::Receiver<Arrival>>;

/// Storage cell of the [`Queue`](super::Queue).
///
/// Transitions `Pending -> Resolved` or `Pending -> Errored` at most once.
/// `Resolved` and `Errored` are terminal.
pub(crate) enum Slot {
    /// The consumer arrived before the producer wrote this index.
    Pending {
        /// Taken by the producer when it settles the slot.
        notify: Option<oneshot::Sender<Arrival>>,
        /// Cloned by every waiter.
        waiter: SlotWaiter,
    },
    /// Holds a fragment.
    Resolved(Fragment),
    /// Holds a terminal failure.
    Errored(TypewriterError),
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending { notify, .. } => f
                .debug_struct("Pending")
                .field("settled", &notify.is_none())
                .finish_non_exhaustive(),
            Self::Resolved(fragment) => f.debug_tuple("Resolved").field(fragment).finish(),
            Self::Errored(err) => f.debug_tuple("Errored").field(err).finish(),
        }
    }
}

impl Slot {
    /// Create a pending slot.
    pub(crate) fn pending() -> Self {
        Self::waiting().0
    }

    /// Create a pending slot along with a waiter on it.
    pub(crate) fn waiting() -> (Self, SlotWaiter) {
        let (notify, rx) = oneshot::channel();
        let waiter = rx.shared();
        let slot = Self::Pending {
            notify: Some(notify),
            waiter: waiter.clone(),
        };
        (slot, waiter)
    }

    /// Check if the slot holds a fragment.
    pub(crate) const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Wake anyone waiting on this slot. No-op for settled slots.
    pub(crate) fn settle(&mut self, arrival: Arrival) {
        if let Self::Pending { notify, .. } = self {
            if let Some(tx) = notify.take() {
                // Waiters may have been dropped; nothing to do then.
                let _ = tx.send(arrival);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_slot_wakes_every_waiter() {
        let mut slot = Slot::pending();
        let Slot::Pending { waiter, .. } = &slot else {
            panic!("Expected pending slot");
        };
        let first = waiter.clone();
        let second = waiter.clone();

        slot.settle(Ok(Some(Fragment::new(0, "foo"))));

        let a = first.await.unwrap().unwrap().unwrap();
        let b = second.await.unwrap().unwrap().unwrap();
        assert_eq!(a.text(), "foo");
        assert_eq!(b.text(), "foo");
    }

    #[test]
    fn test_settle_is_noop_on_resolved() {
        let mut slot = Slot::Resolved(Fragment::new(0, "foo"));
        slot.settle(Ok(None));
        assert!(slot.is_resolved());
    }
}
