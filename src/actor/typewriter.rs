//! Typewriter Actor: dedicated thread that drives a pipeline.
//!
//! Render loops built on threads and channels (rather than async) can't
//! poll a [`TypewriterStream`](crate::TypewriterStream) directly. This actor
//! runs the pipeline on its own single-threaded Tokio runtime and forwards
//! every paced piece over a channel, ready for `select!`.

use super::messages::TypewriterEvent;
use crate::error::{Result, TypewriterError};
use crate::pipeline::Typewriter;
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::stream::{Stream, StreamExt};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::Notify;
use tracing::debug;

/// Shutdown request shared with the pipeline thread.
///
/// The flag covers requests made before the loop starts waiting; the
/// notification interrupts a wait already in progress.
#[derive(Debug, Default)]
struct Shutdown {
    requested: AtomicBool,
    notify: Notify,
}

impl Shutdown {
    fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
        self.notify.notify_one();
    }

    fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Actor that paces a fragment source on a background thread.
pub struct TypewriterActor {
    /// Handle to the pipeline thread.
    handle: Option<JoinHandle<()>>,
    /// Shutdown signal.
    shutdown: Arc<Shutdown>,
    /// Receiver for paced pieces.
    event_rx: Receiver<TypewriterEvent>,
}

impl TypewriterActor {
    /// Spawn a thread that runs `typewriter` over `source`.
    ///
    /// Pieces go through an unbounded channel so a slow receiver never
    /// blocks the runtime thread the producer task shares.
    pub fn spawn<S, T, E>(typewriter: Typewriter, source: S) -> Result<Self>
    where
        S: Stream<Item = std::result::Result<T, E>> + Send + 'static,
        T: Into<String> + Send + 'static,
        E: Display + Send + 'static,
    {
        let shutdown = Arc::new(Shutdown::default());
        let shutdown_clone = shutdown.clone();
        let (event_tx, event_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("flywheel-typewriter".to_string())
            .spawn(move || {
                Self::run_loop(&typewriter, source, &event_tx, &shutdown_clone);
            })
            .map_err(|e| TypewriterError::Actor(e.to_string()))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            event_rx,
        })
    }

    /// Get a reference to the event receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<TypewriterEvent> {
        &self.event_rx
    }

    /// Signal the actor to stop.
    ///
    /// Takes effect immediately, even while the pipeline is waiting on a
    /// stalled source or a scheduled delay.
    pub fn shutdown(&self) {
        self.shutdown.request();
    }

    /// Wait for the actor thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main actor loop.
    fn run_loop<S, T, E>(
        typewriter: &Typewriter,
        source: S,
        event_tx: &Sender<TypewriterEvent>,
        shutdown: &Shutdown,
    ) where
        S: Stream<Item = std::result::Result<T, E>> + Send + 'static,
        T: Into<String> + Send + 'static,
        E: Display + Send + 'static,
    {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                let _ = event_tx.send(TypewriterEvent::Failed(TypewriterError::Actor(e.to_string())));
                return;
            }
        };

        runtime.block_on(async {
            let mut pieces = typewriter.pipe(source);
            loop {
                if shutdown.is_requested() {
                    debug!("typewriter actor shut down");
                    return;
                }

                let next = tokio::select! {
                    () = shutdown.notify.notified() => {
                        debug!("typewriter actor shut down while waiting");
                        return;
                    }
                    next = pieces.next() => next,
                };
                let event = match next {
                    Some(Ok(piece)) => TypewriterEvent::Piece(piece),
                    Some(Err(err)) => TypewriterEvent::Failed(err),
                    None => TypewriterEvent::Finished,
                };
                let terminal = event.is_terminal();

                // Receiver dropped: nobody is listening any more.
                if event_tx.send(event).is_err() || terminal {
                    return;
                }
            }
        });
    }
}

impl Drop for TypewriterActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
