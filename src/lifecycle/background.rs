//! Detached background work.

use std::future::Future;

use tokio::task::JoinHandle;

/// Handle to a named background unit of work.
///
/// Dropping the handle detaches the task: it keeps running until its own
/// loop exits or the process ends, and it cannot keep the process alive.
/// Holding the handle allows a deterministic [`join`](Self::join) or
/// [`cancel`](Self::cancel) instead.
#[derive(Debug)]
pub struct BackgroundTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl BackgroundTask {
    /// Spawn `future` as a named background task.
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!(task = name, "background task starting");
        Self {
            name,
            handle: tokio::spawn(future),
        }
    }

    /// True once the task has run to completion or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to finish on its own.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            if !err.is_cancelled() {
                tracing::warn!(task = self.name, error = %err, "background task panicked");
            }
        }
    }

    /// Abort the task and wait for it to wind down.
    pub async fn cancel(self) {
        self.handle.abort();
        let _ = self.handle.await;
        tracing::debug!(task = self.name, "background task cancelled");
    }
}
