//! Fixed-size background task pool
//!
//! Work that must stay off the caller's path (disk maintenance, the expiry
//! sweep) is handed to a small pool of worker tasks draining a bounded
//! channel. Submission is fire-and-forget: the caller never blocks and
//! never observes a result.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// How many submitted jobs may wait before new ones are dropped
const QUEUE_CAPACITY: usize = 32;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Fixed-size pool of background workers
pub struct TaskPool {
    tx: mpsc::Sender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskPool {
    /// Spawns a pool with the given number of worker tasks
    ///
    /// A size of zero is treated as one worker.
    pub fn new(workers: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Job>(QUEUE_CAPACITY);
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..workers.max(1))
            .map(|id| {
                let rx = Arc::clone(&rx);
                tokio::spawn(async move {
                    loop {
                        // Hold the lock only while pulling the next job so
                        // idle workers don't serialize each other's work
                        let job = { rx.lock().await.recv().await };
                        match job {
                            Some(job) => job.await,
                            None => break,
                        }
                    }
                    tracing::trace!(worker = id, "Task pool worker exiting");
                })
            })
            .collect();

        Self { tx, workers }
    }

    /// Submits a unit of work for background execution
    ///
    /// Never blocks. If the queue is full the job is dropped with a
    /// warning.
    pub fn submit<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.tx.try_send(Box::pin(task)).is_err() {
            tracing::warn!("Task queue full, dropping background job");
        }
    }

    /// Closes the queue and waits for the workers to drain it
    pub async fn shutdown(self) {
        drop(self.tx);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}
