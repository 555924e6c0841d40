// Implement the BucketLister trait for the s3::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    Bucket,
    BucketLister,
    Buckets,
    ObjectListing,
};
use super::client::Client;
use tracing::debug;

#[async_trait]
impl BucketLister for Client {
    /// Return `Buckets` discovered in S3, filtered by the `include` and
    /// `exclude` substrings provided on the command line.
    async fn buckets(&self) -> Result<Buckets> {
        debug!("buckets: Listing...");

        let mut buckets = self.list_buckets().await?;

        filter_buckets(&mut buckets, &self.include, &self.exclude);

        Ok(buckets)
    }

    /// Return every object in `bucket`.
    ///
    /// A failure is recorded inside the returned listing, alongside any
    /// objects retrieved before the failure.
    async fn list_objects(&self, bucket: &Bucket) -> ObjectListing {
        self.list_bucket_objects(&bucket.name).await
    }
}

// An empty include matches every bucket, an empty exclude excludes none.
fn filter_buckets(buckets: &mut Buckets, include: &str, exclude: &str) {
    buckets.retain(|bucket| {
        bucket.name.contains(include)
            && (exclude.is_empty() || !bucket.name.contains(exclude))
    });
}
