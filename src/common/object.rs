// Object listing types returned by the storage boundary
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Utc,
};

/// A single object in a bucket, as returned by the object listing.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSummary {
    /// The object key.
    pub key: String,

    /// When the object was last modified.
    pub last_modified: DateTime<Utc>,

    /// Object size in bytes.
    pub size: u64,

    /// Canonical ID of the owning identity, when S3 returned one.
    pub owner_id: Option<String>,
}

/// The complete object listing for one bucket.
///
/// A failed page fetch ends the listing early. Everything retrieved before
/// the failure is kept and the error is recorded alongside it, so callers
/// can still aggregate the partial listing.
#[derive(Debug, Default)]
pub struct ObjectListing {
    /// The objects retrieved, in API order.
    pub objects: Vec<ObjectSummary>,

    /// Description of the failure that ended the listing, if any.
    pub error: Option<String>,
}
