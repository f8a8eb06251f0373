use s3_pool_upload::{demo, Error, Mode};

#[tokio::main]
async fn main() -> Result<(), Error> {
    demo::init_logging();
    demo::run(Mode::Sequential).await.map(drop)
}
