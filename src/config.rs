use crate::err::Error;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(default))]
pub struct Config {
    /// Local files are read from `base_directory.join(key)`
    pub base_directory: PathBuf,
    /// Destination bucket of every upload
    pub bucket: String,
    /// Maximum number of simultaneous upload requests in pooled mode
    pub pool_size: usize,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            bucket: "s3-threading-examples".to_owned(),
            pool_size: 8,
        }
    }
}
impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.pool_size == 0 {
            return Err(Error::InvalidConfig {
                reason: "pool_size must be at least 1".to_owned(),
            });
        }
        if self.bucket.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "bucket must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
