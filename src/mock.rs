use crate::err::{self, Error};
use crate::storage::Storage;
use async_trait::async_trait;
use snafu::futures::TryFutureExt;
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct UploadCall {
    pub path: PathBuf,
    pub bucket: String,
    pub key: String,
}

/// Storage that reads the local file like a real upload would (so missing files fail), sleeps
/// for `delay`, and records every call along with the peak number of simultaneous calls.
#[derive(Clone)]
pub(crate) struct StorageMock {
    delay: Duration,
    calls: Arc<Mutex<Vec<UploadCall>>>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}
impl StorageMock {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: Arc::new(Mutex::new(Vec::new())),
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }
    pub fn calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for StorageMock {
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<(), Error> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(UploadCall {
            path: path.to_owned(),
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        });

        let result = tokio::fs::read(path.to_owned())
            .context(err::Io {
                description: path.display().to_string(),
            })
            .await;
        if result.is_ok() {
            tokio::time::sleep(self.delay).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        result.map(drop)
    }
}

/// Storage where each upload takes a random time between 0 and `max_delay`, so that uploads
/// complete in a different order than they were started.
#[derive(Clone)]
pub(crate) struct StorageMockJitter {
    max_delay_ms: u64,
}
impl StorageMockJitter {
    pub fn new(max_delay: Duration) -> Self {
        Self {
            max_delay_ms: max_delay.as_millis() as u64,
        }
    }
}

#[async_trait]
impl Storage for StorageMockJitter {
    async fn upload_file(&self, _path: &Path, _bucket: &str, _key: &str) -> Result<(), Error> {
        use rand::Rng;
        let delay = rand::thread_rng().gen_range(0..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(())
    }
}
