// BucketLister trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::{
    Bucket,
    Buckets,
    ObjectListing,
};

/// `BucketLister` represents the required methods to discover S3 buckets and
/// retrieve their object listings.
///
/// This trait should be implemented by all `Client`s performing these tasks.
#[async_trait]
pub trait BucketLister {
    /// Returns the buckets to be analyzed.
    async fn buckets(&self) -> Result<Buckets>;

    /// Returns the complete object listing for the given `bucket`.
    ///
    /// Failures are recorded inside the listing rather than returned, so
    /// one bucket's failure never aborts the run.
    async fn list_objects(&self, bucket: &Bucket) -> ObjectListing;
}
