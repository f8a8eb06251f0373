//! The `Storage` trait is the single operation the upload algorithms need from an object store:
//! upload the local file at a path to a bucket under some key.
use crate::err::{self, Error};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use snafu::ResultExt;
use std::path::Path;
use tracing::debug;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload the file at `path` to `bucket`, with object key `key`.
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<(), Error>;
}

#[async_trait]
impl Storage for Client {
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<(), Error> {
        // Streams from the file, it is never fully loaded into memory
        let body = ByteStream::from_path(path)
            .await
            .context(err::ReadFile { path })?;
        self.put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .context(err::PutObject { key })?;
        Ok(())
    }
}

/// S3 client using the shared AWS configuration of the credentials profile `profile`.
///
/// `endpoint` overrides the endpoint of the service, in which case path-style addressing is used
/// so that S3-compatible servers such as minio work.
pub async fn s3_client(profile: &str, endpoint: Option<&str>) -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(profile)
        .load()
        .await;
    let mut cfg = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = endpoint {
        debug!(profile, endpoint, "Using custom S3 endpoint");
        cfg = cfg.endpoint_url(endpoint).force_path_style(true);
    }
    Client::from_conf(cfg.build())
}

/// S3 client for testing - assumes local minio on port 9000 and an existing credentials profile
/// called `testing`
pub async fn testing_s3_client() -> Client {
    s3_client("testing", Some("http://localhost:9000")).await
}
