//! One-shot storage readiness signal
//!
//! Backing storage announces "ready" exactly once per process lifetime from
//! the consumer's point of view: however many times the signal side fires,
//! a [`ReadyWatcher`] runs its callback at most once and then detaches.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Sender side of the readiness notification
///
/// Owned by whoever initializes the backing storage. Firing is idempotent;
/// watchers observe readiness at most once.
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    /// Creates a signal in the not-ready state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Marks storage as ready
    ///
    /// Safe to call more than once; later calls change nothing observers
    /// haven't already seen.
    pub fn notify_ready(&self) {
        self.tx.send_replace(true);
    }

    /// Creates an observer handle for this signal
    pub fn watch(&self) -> ReadyWatcher {
        ReadyWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of the readiness notification
#[derive(Debug)]
pub struct ReadyWatcher {
    rx: watch::Receiver<bool>,
}

impl ReadyWatcher {
    /// Runs `f` once when readiness is first observed, then detaches
    ///
    /// If storage was already ready at subscribe time the callback fires
    /// immediately. If the signal side is dropped without ever becoming
    /// ready, the watcher task ends silently and `f` is never invoked.
    ///
    /// # Returns
    /// Handle for the spawned watcher task; awaiting it waits until the
    /// callback has run or the signal is gone.
    pub fn subscribe_once<F>(mut self, f: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        tokio::spawn(async move {
            if *self.rx.borrow_and_update() {
                f();
                return;
            }

            while self.rx.changed().await.is_ok() {
                if *self.rx.borrow_and_update() {
                    f();
                    return;
                }
            }
        })
    }
}
