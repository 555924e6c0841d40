// Definition of a bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Utc,
};

/// Represents an S3 bucket selected for analysis.
///
/// This only carries the bucket's identity, everything else is discovered
/// during analysis.
#[derive(Clone, Debug)]
pub struct Bucket {
    /// The bucket name.
    pub name: String,

    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
}

/// Convenience type for a list of `Bucket`.
pub type Buckets = Vec<Bucket>;
