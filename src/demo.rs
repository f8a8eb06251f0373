//! The demonstration run behind the `upload-sequential` and `upload-pooled` binaries: a fixed
//! list of files from the working directory, uploaded to a fixed bucket with the credentials of
//! the `default` profile.
use crate::{s3_client, BatchReport, Config, Error, Mode, S3Batch};
use futures::future::ready;

pub const BASE_DIRECTORY: &str = ".";
pub const BUCKET: &str = "s3-threading-examples";
pub const PROFILE: &str = "default";
pub const POOL_SIZE: usize = 8;

/// `example13.txt` is absent and `example14.txt` occurs twice; both are uploaded as listed.
pub const KEYS: [&str; 15] = [
    "example1.txt",
    "example2.txt",
    "example3.txt",
    "example4.txt",
    "example5.txt",
    "example6.txt",
    "example7.txt",
    "example8.txt",
    "example9.txt",
    "example10.txt",
    "example11.txt",
    "example12.txt",
    "example14.txt",
    "example14.txt",
    "example15.txt",
];

pub fn config() -> Config {
    Config {
        base_directory: BASE_DIRECTORY.into(),
        bucket: BUCKET.to_owned(),
        pool_size: POOL_SIZE,
    }
}

/// Upload `KEYS` with `mode`, printing every progress line and finally the elapsed time.
pub async fn run(mode: Mode) -> Result<BatchReport, Error> {
    let batch = S3Batch::with_config(s3_client(PROFILE, None).await, config());
    let report = batch
        .run(KEYS, mode, |progress| {
            println!("{}", progress);
            ready(())
        })
        .await?;
    println!("Elapsed time in seconds: {}", report.elapsed_secs());
    Ok(report)
}

/// Install a `tracing` subscriber on stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
