use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStreamError;
use snafu::Snafu;
use std::io;
use std::path::PathBuf;

#[derive(Snafu, Debug)]
#[snafu(visibility = "pub")]
pub enum Error {
    #[snafu(display("Io error: {}: {}", description, source))]
    Io {
        source: io::Error,
        description: String,
    },
    #[snafu(display("Cannot read local file {}: {:?}", path.display(), source))]
    ReadFile {
        path: PathBuf,
        source: ByteStreamError,
    },
    #[snafu(display("S3 'put object' error on key '{}': {}", key, source))]
    PutObject {
        key: String,
        source: SdkError<PutObjectError>,
    },
    #[snafu(display("Cannot upload an empty key"))]
    EmptyKey,
    #[snafu(display("Invalid configuration: {}", reason))]
    InvalidConfig { reason: String },
    /// A pool worker panicked or was cancelled by the runtime
    #[snafu(display("Upload worker failed: {}", source))]
    Worker { source: tokio::task::JoinError },
    #[snafu(display("Upload #{} was abandoned by the worker pool", seq))]
    Abandoned { seq: usize },
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn error_traits() {
        fn foo<T: Send + Sync + 'static>(_: T) {}
        foo(Error::Io {
            source: io::Error::from_raw_os_error(1),
            description: "hello".into(),
        });
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::EmptyKey.to_string(),
            "Cannot upload an empty key".to_string()
        );
        assert_eq!(
            Error::InvalidConfig {
                reason: "pool_size must be at least 1".into()
            }
            .to_string(),
            "Invalid configuration: pool_size must be at least 1"
        );
        assert_eq!(
            Error::Abandoned { seq: 3 }.to_string(),
            "Upload #3 was abandoned by the worker pool"
        );
    }
}
