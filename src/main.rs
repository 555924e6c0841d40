// s3report: Report object count, total size, and per owner usage for S3
// buckets.
#![forbid(unsafe_code)]
use anyhow::{
    bail,
    Context,
    Result,
};
use std::io;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod analysis;
mod cli;
mod common;
mod format;
mod orchestrator;
mod s3;

use common::{
    BucketLister,
    ClientConfig,
    Region,
    SizeUnit,
};
use format::OutputFormat;
use orchestrator::RunConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they can never mix with reports on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = cli::parse_args();

    let region = match matches.get_one::<String>("REGION") {
        Some(region) => Region::new().set_region(region),
        None         => Region::new(),
    };

    let include = matches.get_one::<String>("INCLUDE").cloned().unwrap_or_default();
    let exclude = matches.get_one::<String>("EXCLUDE").cloned().unwrap_or_default();

    let count = matches.get_one::<i64>("COUNT")
        .copied()
        .unwrap_or(cli::DEFAULT_COUNT);

    let concurrency = matches.get_one::<u16>("CONCURRENCY")
        .copied()
        .unwrap_or(cli::DEFAULT_CONCURRENCY) as usize;

    let unit = matches.get_one::<String>("UNIT")
        .map(String::as_str)
        .unwrap_or(cli::DEFAULT_UNIT);

    let unit = SizeUnit::from_str(unit).map_err(anyhow::Error::msg)?;

    let format = if matches.get_flag("JSON") {
        OutputFormat::Json
    }
    else {
        OutputFormat::HumanReadable
    };

    let config = ClientConfig {
        include: include,
        exclude: exclude,
        region:  region,
    };

    let lister = Arc::new(s3::Client::new(config).await);

    let buckets = lister.buckets().await.context("Could not get buckets")?;

    if buckets.is_empty() {
        bail!("No buckets found");
    }

    let config = RunConfig {
        count:       count,
        format:      format,
        unit:        unit,
        concurrency: concurrency,
    };

    // Per bucket failures are embedded in each bucket's report; only being
    // unable to run the report at all is fatal.
    orchestrator::run(lister, buckets, &config, &mut io::stdout()).await
}
