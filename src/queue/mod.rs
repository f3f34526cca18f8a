//! Queue: ordered, index-addressed buffer between producer and consumer.
//!
//! One producer task appends fragments in order while one consumer pulls
//! them in order. The consumer may arrive before the producer has written
//! an index; the pull then parks on a pending slot that the producer
//! settles later.
//!
//! # Architecture
//!
//! ```text
//!  upstream ──▶ Queue::consume ──▶ [ R | R | R | P ] ──▶ Queue::fragments ──▶ pipeline
//!                (producer)          slots            (consumer, may wait on P)
//! ```
//!
//! Storage sits behind a mutex that is only held for slot bookkeeping and
//! never across an `.await`.

mod fragment;
mod slot;
mod state;

pub use fragment::Fragment;
pub use state::QueueState;

use crate::error::{Result, TypewriterError};
use futures::stream::{self, Stream, StreamExt};
use slot::{Arrival, Slot, SlotWaiter};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Shared storage of the queue.
#[derive(Debug, Default)]
struct Inner {
    /// Slots indexed by fragment index.
    slots: Vec<Slot>,
    /// Next index the producer writes.
    cursor: usize,
    /// Frozen slot count once the producer finished.
    total: Option<usize>,
    /// Length of the leading run of resolved slots.
    resolved: usize,
}

impl Inner {
    /// Write `slot` at the producer cursor and advance it.
    fn write(&mut self, slot: Slot, arrival: Arrival) {
        let index = self.cursor;
        if index < self.slots.len() {
            let mut previous = std::mem::replace(&mut self.slots[index], slot);
            previous.settle(arrival);
        } else {
            self.slots.push(slot);
        }
        self.cursor += 1;
    }

    /// Get a waiter for `index`, which lies past the written slots.
    ///
    /// Placeholders are pushed for any gap so slot `i` stays at position `i`.
    fn wait_past_end(&mut self, index: usize) -> SlotWaiter {
        while self.slots.len() < index {
            self.slots.push(Slot::pending());
        }
        let (slot, waiter) = Slot::waiting();
        self.slots.push(slot);
        waiter
    }
}

/// Ordered asynchronous buffer of upstream fragments.
///
/// Cloning yields another handle to the same queue. A queue serves exactly
/// one producer ([`Queue::consume`]) and one consumer traversal
/// ([`Queue::fragments`]) and lives for a single pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    inner: Arc<Mutex<Inner>>,
}

impl Queue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the storage.
    ///
    /// Slots are append-only, so state behind a poisoned lock is still valid.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drain `source` into the queue.
    ///
    /// Each item is written into the next slot and stamped with its arrival
    /// time. An upstream failure is recorded as an errored slot at the
    /// current position. Either way the queue is finalized when the source
    /// stops. This future never waits on the consumer; run it as its own
    /// task.
    pub async fn consume<S, T, E>(&self, source: S)
    where
        S: Stream<Item = std::result::Result<T, E>>,
        T: Into<String>,
        E: Display,
    {
        let mut guard = ProducerGuard {
            queue: self,
            finished: false,
        };
        let mut source = std::pin::pin!(source);

        debug!("producer started");
        while let Some(item) = source.next().await {
            match item {
                Ok(text) => self.put(text.into()),
                Err(reason) => {
                    self.error(TypewriterError::upstream(reason));
                    break;
                }
            }
        }
        self.complete();
        guard.finished = true;
    }

    /// Append a fragment at the producer cursor.
    pub(crate) fn put(&self, text: String) {
        let mut inner = self.lock();
        if inner.total.is_some() {
            return;
        }

        let fragment = Fragment::new(inner.cursor, text);
        if inner.resolved == inner.cursor {
            inner.resolved += 1;
        }
        trace!(index = fragment.index(), len = fragment.len(), "fragment appended");
        inner.write(Slot::Resolved(fragment.clone()), Ok(Some(fragment)));
    }

    /// Record a terminal failure at the producer cursor.
    pub(crate) fn error(&self, err: TypewriterError) {
        let mut inner = self.lock();
        if inner.total.is_some() {
            return;
        }

        debug!(index = inner.cursor, error = %err, "producer recorded failure");
        inner.write(Slot::Errored(err.clone()), Err(err));
    }

    /// Freeze the slot count. Pending placeholders past the end are woken
    /// with end-of-stream and dropped.
    pub(crate) fn complete(&self) {
        let mut inner = self.lock();
        if inner.total.is_some() {
            return;
        }

        let total = inner.cursor;
        for mut slot in inner.slots.drain(total..) {
            slot.settle(Ok(None));
        }
        inner.total = Some(total);
        debug!(total, "producer finished");
    }

    /// Take a snapshot of the leading resolved fragments. Never suspends.
    pub fn state(&self) -> QueueState {
        let inner = self.lock();
        let resolved = inner
            .slots
            .iter()
            .map_while(|slot| match slot {
                Slot::Resolved(fragment) => Some(fragment.clone()),
                Slot::Pending { .. } | Slot::Errored(_) => None,
            })
            .collect();
        QueueState::new(resolved, inner.total.is_some())
    }

    /// Number of leading resolved fragments.
    ///
    /// Same as `state().resolved_count()` without copying any fragment.
    pub fn resolved_count(&self) -> usize {
        self.lock().resolved
    }

    /// Whether the producer has finished.
    pub fn is_completed(&self) -> bool {
        self.lock().total.is_some()
    }

    /// Number of fragments written so far, including a failure slot.
    pub fn written(&self) -> usize {
        self.lock().cursor
    }

    /// Pull the fragment at `index`, waiting if the producer is behind.
    ///
    /// Returns `Ok(None)` once `index` is past the end of a completed queue.
    pub async fn pull(&self, index: usize) -> Result<Option<Fragment>> {
        let waiter = {
            let mut inner = self.lock();
            if inner.total.is_some_and(|total| index >= total) {
                return Ok(None);
            }

            match inner.slots.get(index) {
                Some(Slot::Resolved(fragment)) => return Ok(Some(fragment.clone())),
                Some(Slot::Errored(err)) => return Err(err.clone()),
                Some(Slot::Pending { waiter, .. }) => waiter.clone(),
                None => {
                    debug!(index, "consumer ahead of producer, waiting");
                    inner.wait_past_end(index)
                }
            }
        };

        waiter
            .await
            .unwrap_or(Err(TypewriterError::ProducerGone { index }))
    }

    /// Ordered view of the fragments, starting at index 0.
    ///
    /// The stream ends after the last fragment of a completed queue, or
    /// right after yielding a failure.
    pub fn fragments(&self) -> impl Stream<Item = Result<Fragment>> + Send + 'static {
        let queue = self.clone();
        stream::unfold(Some(0usize), move |cursor| {
            let queue = queue.clone();
            async move {
                let index = cursor?;
                match queue.pull(index).await {
                    Ok(Some(fragment)) => Some((Ok(fragment), Some(index + 1))),
                    Ok(None) => None,
                    Err(err) => Some((Err(err), None)),
                }
            }
        })
    }
}

/// Finalizes the queue if the producer future is dropped or panics before
/// the source ends, so a waiting consumer is not parked forever.
struct ProducerGuard<'a> {
    queue: &'a Queue,
    finished: bool,
}

impl Drop for ProducerGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let index = self.queue.written();
            self.queue.error(TypewriterError::ProducerGone { index });
            self.queue.complete();
        }
    }
}
