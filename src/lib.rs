//! # S3 batch uploads
//! Upload a list of local files to one S3 bucket, either one file after the other or with a
//! fixed-size pool of upload workers, and time the whole batch.
//!
//! - Upload single files with `Uploader::upload`.
//! - Upload many files with `S3Batch::run`, `S3Batch::upload_sequential` or
//! `S3Batch::upload_pooled`.
//!
//! Each local file is read from `{base_directory}/{key}` and uploaded with object key `key`.
//! There are no retries: the first failed upload aborts the batch.

use futures::future::Future;
use futures_stopwatch::try_stopwatch;
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};
use tracing::{debug, info, warn};

mod batch;
mod config;
pub mod demo;
pub mod err;
pub mod pool;
mod storage;
mod upload;

pub use config::*;
pub use err::Error;
pub use pool::WorkerPool;
pub use storage::*;
pub use upload::*;

#[cfg(test)]
mod mock;

#[derive(Clone)]
pub struct S3Batch<C> {
    uploader: Uploader<C>,
    config: Config,
}
impl<C: Storage> S3Batch<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, Config::default())
    }
    pub fn with_config(client: C, config: Config) -> Self {
        Self {
            uploader: Uploader::from_config(client, &config),
            config,
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn uploader(&self) -> &Uploader<C> {
        &self.uploader
    }
}

/// How the files of a batch are uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One file at a time, in order
    Sequential,
    /// Up to `Config::pool_size` files at a time
    Pooled,
}
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Pooled => write!(f, "pooled"),
        }
    }
}
impl FromStr for Mode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "pooled" => Ok(Self::Pooled),
            other => Err(Error::InvalidConfig {
                reason: format!("unknown upload mode '{}'", other),
            }),
        }
    }
}

/// Progress of a batch, passed to the `progress` closure of the batch algorithms.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// The upload of `key` (number `seq` in the batch) is starting
    Started { seq: usize, key: String },
    /// An upload finished. In pooled mode these arrive in the order the keys were given.
    Uploaded(UploadReport),
}
impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { key, .. } => write!(f, "Uploading {}", key),
            Self::Uploaded(report) => write!(f, "{}", report),
        }
    }
}

/// Summary of a successful batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchReport {
    pub mode: Mode,
    /// Number of uploaded files, counting duplicate keys once per occurrence
    pub uploaded: usize,
    /// Wall-clock time from dispatch of the first upload until the last result was retrieved
    pub elapsed: Duration,
}
impl BatchReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
