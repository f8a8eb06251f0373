use super::*;

impl<C: Storage + Clone + 'static> S3Batch<C> {
    /// Upload the files named by `keys` with the given `mode`.
    ///
    /// `progress` is called when an upload starts and when its result is retrieved, see
    /// [`Progress`](enum.Progress.html). It returns a generic `F: Future` to support async
    /// operations like logging the results to a file; this future is run as part of the batch.
    ///
    /// The same key may occur several times, and is then uploaded several times.
    pub async fn run<I, K, P, F>(&self, keys: I, mode: Mode, progress: P) -> Result<BatchReport, Error>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        P: Fn(Progress) -> F + Clone + Send + Sync + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        match mode {
            Mode::Sequential => self.upload_sequential(keys, progress).await,
            Mode::Pooled => self.upload_pooled(keys, progress).await,
        }
    }

    /// Upload one file at a time, in the order of `keys`. Stops at the first failure.
    pub async fn upload_sequential<I, K, P, F>(
        &self,
        keys: I,
        progress: P,
    ) -> Result<BatchReport, Error>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        P: Fn(Progress) -> F,
        F: Future<Output = ()>,
    {
        self.config.validate()?;
        let keys = keys.into_iter().map(Into::into).collect::<Vec<String>>();
        let n_files = keys.len();
        info!(mode = %Mode::Sequential, n_files, bucket = %self.config.bucket, "Batch upload started");

        let (uploaded, elapsed) = try_stopwatch(async {
            for (seq, key) in keys.into_iter().enumerate() {
                progress(Progress::Started {
                    seq,
                    key: key.clone(),
                })
                .await;
                let mut report = self.uploader.upload(&key).await?;
                report.seq = seq;
                progress(Progress::Uploaded(report)).await;
            }
            Ok::<_, Error>(n_files)
        })
        .await?;

        info!(mode = %Mode::Sequential, uploaded, elapsed_s = elapsed.as_secs_f64(), "Batch upload finished");
        Ok(BatchReport {
            mode: Mode::Sequential,
            uploaded,
            elapsed,
        })
    }

    /// Upload with at most `config.pool_size` simultaneous uploads.
    ///
    /// Results are handed to `progress` in the order of `keys`, even though uploads may complete
    /// in a different order. The first failure, in the order of `keys`, is returned: uploads
    /// that have not started yet are abandoned, and running ones are waited for before
    /// returning.
    pub async fn upload_pooled<I, K, P, F>(&self, keys: I, progress: P) -> Result<BatchReport, Error>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        P: Fn(Progress) -> F + Clone + Send + Sync + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        self.config.validate()?;
        let keys = keys.into_iter().map(Into::into).collect::<Vec<String>>();
        let pool_size = self.config.pool_size;
        info!(mode = %Mode::Pooled, n_files = keys.len(), pool_size, bucket = %self.config.bucket, "Batch upload started");

        let (uploaded, elapsed) = try_stopwatch(async {
            let mut pool = WorkerPool::new(pool_size);
            for (seq, key) in keys.into_iter().enumerate() {
                let (uploader, progress) = (self.uploader.clone(), progress.clone());
                pool.submit(async move {
                    progress(Progress::Started {
                        seq,
                        key: key.clone(),
                    })
                    .await;
                    let mut report = uploader.upload(&key).await?;
                    report.seq = seq;
                    Ok::<_, Error>(report)
                });
            }

            let outcome = async {
                let mut uploaded = 0;
                while let Some(result) = pool.next().await {
                    progress(Progress::Uploaded(result?)).await;
                    uploaded += 1;
                }
                Ok::<_, Error>(uploaded)
            }
            .await;

            if let Err(ref e) = outcome {
                warn!(error = %e, abandoned = pool.pending(), "Batch upload aborted");
            }
            pool.shutdown().await;
            outcome
        })
        .await?;

        info!(mode = %Mode::Pooled, uploaded, elapsed_s = elapsed.as_secs_f64(), "Batch upload finished");
        Ok(BatchReport {
            mode: Mode::Pooled,
            uploaded,
            elapsed,
        })
    }
}
