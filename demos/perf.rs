use clap::{App, Arg};
use futures::future::ready;
use s3_pool_upload::*;
use std::{io::Write, path::PathBuf};

#[tokio::main]
async fn main() -> Result<(), Error> {
    demo::init_logging();
    let mut app = App::new("Example 'perf'")
        .before_help("Upload a directory to S3 on localhost, sequentially and with a worker pool.")
        .arg(
            Arg::new("source")
                .help("Path to a folder to upload to S3")
                .required(true),
        )
        .arg(
            Arg::new("dest_bucket")
                .help("Destination bucket")
                .required(true),
        )
        .arg(
            Arg::new("pool_size")
                .short('n')
                .takes_value(true)
                .default_value("8")
                .help("Maximum number of simultaneous upload requests"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .takes_value(true)
                .possible_values(["sequential", "pooled", "both"])
                .default_value("both")
                .help("Which upload algorithm to benchmark"),
        );
    let matches = app.clone().get_matches();

    if let (Some(path), Some(bucket)) = (matches.value_of("source"), matches.value_of("dest_bucket"))
    {
        let pool_size = matches
            .value_of_t::<usize>("pool_size")
            .unwrap_or_else(|e| e.exit());
        let modes = match matches.value_of("mode") {
            Some("both") | None => vec![Mode::Sequential, Mode::Pooled],
            Some(mode) => vec![mode.parse()?],
        };
        let cfg = Config {
            base_directory: PathBuf::from(path),
            bucket: bucket.to_owned(),
            pool_size,
        };
        for mode in modes {
            let report = benchmark_s3_upload(cfg.clone(), mode).await?;
            println!(
                "{}: {} files in {:.3}s",
                report.mode,
                report.uploaded,
                report.elapsed_secs()
            );
        }
    } else {
        let _ = app.print_help();
    }
    Ok(())
}

async fn benchmark_s3_upload(cfg: Config, mode: Mode) -> Result<BatchReport, Error> {
    let keys = files_recursive(cfg.base_directory.clone()).collect::<Result<Vec<_>, _>>()?;
    let batch = S3Batch::with_config(testing_s3_client().await, cfg);

    upload_perf_log_init(&mut std::io::stdout());
    batch
        .run(keys, mode, |progress| {
            if let Progress::Uploaded(report) = progress {
                upload_perf_log_update(&mut std::io::stdout(), &report);
            }
            ready(())
        })
        .await
}

// Helpers for writing data
macro_rules! write_cell {
    ($out:expr, $x:expr) => {
        let _ = write!($out, "{0: >18}", format!("{}", $x));
    };
}
pub fn upload_perf_log_init<W: Write>(out: &mut W) {
    let _ = writeln!(
        out,
        "{0: >w$}{1: >w$}{2: >w$}",
        "seq",
        "success_ms",
        "key",
        w = 18
    );
}
pub fn upload_perf_log_update<W: Write>(out: &mut W, res: &UploadReport) {
    write_cell!(out, res.seq);
    write_cell!(out, res.elapsed.as_millis());
    write_cell!(out, res.key);
    let _ = writeln!(out);
}
