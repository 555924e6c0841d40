// Concurrent per bucket analysis
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::analysis::analyze;
use crate::common::{
    BucketLister,
    Buckets,
    SizeUnit,
};
use crate::format::{
    format_report,
    OutputFormat,
};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{
    mpsc,
    Semaphore,
};
use tracing::debug;

/// Settings for one report run.
#[derive(Debug)]
pub struct RunConfig {
    /// Number of objects to display per bucket, negative selects the oldest.
    pub count: i64,

    /// Report rendering selected on the command line.
    pub format: OutputFormat,

    /// Unit used for sizes in human readable reports.
    pub unit: SizeUnit,

    /// Maximum number of buckets analyzed at once.
    pub concurrency: usize,
}

/// Analyze every bucket and write each report to `writer` as its analysis
/// completes.
///
/// Workers hand completed reports to this task over a channel, and this
/// task alone renders and writes them, one complete report per write, so
/// concurrent analyses can never interleave their output.
///
/// Every bucket yields exactly one report. Per bucket failures are part of
/// the report body, not errors; there is no ordering guarantee between
/// buckets.
pub async fn run<L, W>(
    lister:  Arc<L>,
    buckets: Buckets,
    config:  &RunConfig,
    writer:  &mut W,
) -> Result<()>
where
    L: BucketLister + Send + Sync + 'static,
    W: Write,
{
    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let (tx, mut rx) = mpsc::channel(buckets.len().max(1));

    let count = config.count;

    for bucket in buckets {
        let lister    = Arc::clone(&lister);
        let semaphore = Arc::clone(&semaphore);
        let tx        = tx.clone();

        tokio::spawn(async move {
            // The semaphore is never closed while workers are running.
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_)     => return,
            };

            debug!("run: analyzing '{}'", bucket.name);

            let listing = lister.list_objects(&bucket).await;
            let report  = analyze(&bucket, listing, count);

            // Fails only if the receiver is gone, meaning the run itself
            // was abandoned.
            let _ = tx.send(report).await;
        });
    }

    // Workers hold their own senders; the channel drains once the last
    // worker is done.
    drop(tx);

    while let Some(report) = rx.recv().await {
        let formatted = format_report(&report, &config.format, &config.unit);

        writer.write_all(formatted.as_bytes())?;
    }

    writer.flush()?;

    Ok(())
}
