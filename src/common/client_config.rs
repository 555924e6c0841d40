// ClientConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::Region;

/// Client configuration.
#[derive(Debug, Default)]
pub struct ClientConfig {
    /// Substring a bucket name must contain to be reported on.
    ///
    /// An empty string matches every bucket.
    pub include: String,

    /// Substring that excludes a bucket from the report.
    ///
    /// An empty string excludes nothing.
    pub exclude: String,

    /// The region that our AWS client should be created in.
    ///
    /// Bucket discovery is global; each bucket's listing resolves the
    /// bucket's own region.
    pub region: Region,
}
