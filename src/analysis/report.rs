// Analysis result types
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// A display line for one of the oldest or newest objects in a bucket.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayObject {
    /// When the object was last modified.
    pub last_modified: DateTime<Utc>,

    /// The object key.
    pub key: String,
}

/// Summary data about the objects in one bucket.
///
/// This is the final, read only form of a bucket's analysis. Formatting
/// never mutates it.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketReport {
    /// The bucket name.
    pub name: String,

    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,

    /// Last modification time of the most recently modified object, or the
    /// Unix epoch if the bucket has no objects.
    pub last_modified: DateTime<Utc>,

    /// Total size in bytes of every object in the bucket.
    pub total_size: u64,

    /// Number of objects in the bucket.
    pub total_count: u64,

    /// Accumulated size in bytes per owning identity.
    #[serde(rename = "SizePerOwnerID")]
    pub size_per_owner: BTreeMap<String, u64>,

    /// The bounded subset of objects selected for display, oldest first.
    #[serde(rename = "Objects")]
    pub display_objects: Vec<DisplayObject>,

    /// Description of a retrieval failure, if one occurred.
    ///
    /// The aggregates above still cover whatever was retrieved before the
    /// failure.
    pub error: Option<String>,
}
