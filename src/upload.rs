use super::*;

/// Result of a single file upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    /// The number of this upload in a batch (0 if not applicable)
    pub seq: usize,
    /// Key of the uploaded object, which is also the file's path relative to the base directory
    pub key: String,
    /// Duration of the transfer
    pub elapsed: Duration,
}
impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} uploaded", self.key)
    }
}

/// Uploads single files from `base_directory` to `bucket`, using the same name locally and
/// remotely.
#[derive(Clone, Debug)]
pub struct Uploader<C> {
    client: C,
    base_directory: PathBuf,
    bucket: String,
}
impl<C: Storage> Uploader<C> {
    pub fn new(client: C, base_directory: PathBuf, bucket: String) -> Self {
        Self {
            client,
            base_directory,
            bucket,
        }
    }
    pub fn from_config(client: C, config: &Config) -> Self {
        Self::new(client, config.base_directory.clone(), config.bucket.clone())
    }

    pub fn local_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(key)
    }

    /// Upload `{base_directory}/{key}` to the bucket under `key`.
    ///
    /// Failures of the transfer (missing file, authorization, service errors) are returned as
    /// they are; there are no retries.
    pub async fn upload(&self, key: &str) -> Result<UploadReport, Error> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        let path = self.local_path(key);
        debug!(key, path = %path.display(), bucket = %self.bucket, "Upload started");
        let ((), elapsed) =
            try_stopwatch(self.client.upload_file(&path, &self.bucket, key)).await?;
        debug!(key, elapsed_ms = elapsed.as_millis() as u64, "Upload finished");
        Ok(UploadReport {
            seq: 0,
            key: key.to_owned(),
            elapsed,
        })
    }
}

/// Convenience function (using `walkdir`) to list all files in directory `base_directory`.
/// Returns the paths relative to `base_directory`, `/`-separated, so that they can be used as
/// keys for an `Uploader` with the same base directory.
pub fn files_recursive(base_directory: PathBuf) -> impl Iterator<Item = Result<String, Error>> {
    walkdir::WalkDir::new(&base_directory)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let key = entry
                    .path()
                    .strip_prefix(&base_directory)
                    .unwrap_or_else(|_| entry.path())
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                Some(Ok(key))
            }
            Ok(_) => None,
            Err(e) => {
                let description = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                Some(Err(Error::Io {
                    source: e.into(),
                    description,
                }))
            }
        })
}
