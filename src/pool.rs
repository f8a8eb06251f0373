//! A fixed-size pool of upload workers, scoped to one batch.
use crate::err::Error;
use futures::future::Future;
use std::{collections::VecDeque, sync::Arc};
use tokio::{sync::Semaphore, task::JoinHandle};
use tracing::debug;

/// Runs submitted jobs as tokio tasks, with at most `size` of them running at any instant.
/// Results are retrieved with `next` in the order the jobs were submitted, regardless of the
/// order in which they complete.
///
/// The pool should be released with `shutdown`. Dropping it closes the pool too, but does not
/// wait for jobs that are still running.
pub struct WorkerPool<T> {
    size: usize,
    permits: Arc<Semaphore>,
    // `None` means the job was abandoned before it started
    pending: VecDeque<(usize, JoinHandle<Option<Result<T, Error>>>)>,
    submitted: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            permits: Arc::new(Semaphore::new(size)),
            pending: VecDeque::new(),
            submitted: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of submitted jobs whose result has not been retrieved yet
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue `job`. It starts as soon as one of the `size` workers is free.
    pub fn submit<F>(&mut self, job: F)
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        let permits = self.permits.clone();
        let handle = tokio::spawn(async move {
            // Fails only when the pool was closed before a worker became free
            let _permit = permits.acquire_owned().await.ok()?;
            Some(job.await)
        });
        self.pending.push_back((self.submitted, handle));
        self.submitted += 1;
    }

    /// Wait for the result of the oldest job that has not been retrieved yet.
    /// Returns `None` when all results have been retrieved.
    pub async fn next(&mut self) -> Option<Result<T, Error>> {
        let (seq, handle) = self.pending.pop_front()?;
        Some(match handle.await {
            Ok(Some(result)) => result,
            Ok(None) => Err(Error::Abandoned { seq }),
            Err(source) => Err(Error::Worker { source }),
        })
    }

    /// Release the pool: jobs that have not started are abandoned, and jobs that are running are
    /// waited for. Their results are discarded.
    pub async fn shutdown(mut self) {
        self.permits.close();
        let remaining = self.pending.len();
        if remaining > 0 {
            debug!(remaining, "Shutting down worker pool with unretrieved jobs");
        }
        for (_, handle) in self.pending.drain(..) {
            let _ = handle.await;
        }
    }
}

impl<T> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.permits.close();
    }
}
