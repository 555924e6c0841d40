// Bucket analysis
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::DateTime;
use crate::common::{
    Bucket,
    ObjectListing,
    ObjectSummary,
};
use std::collections::BTreeMap;
use super::report::{
    BucketReport,
    DisplayObject,
};
use tracing::debug;

/// Sizes are attributed to this identity when S3 returns no owner metadata
/// for an object.
pub const UNKNOWN_OWNER: &str = "unknown";

/// Analyze one bucket's complete object listing.
///
/// Aggregates cover every retrieved object regardless of `count`; `count`
/// only bounds the display subset. A negative `count` selects the oldest
/// objects, a positive one the newest, and zero selects none.
///
/// A failure recorded in the listing is carried into the report, with the
/// aggregates covering the partial listing. This never returns an error,
/// the report's `error` field is the only failure signal.
pub fn analyze(bucket: &Bucket, listing: ObjectListing, count: i64) -> BucketReport {
    debug!("analyze: '{}' with {} objects", bucket.name, listing.objects.len());

    let ObjectListing { mut objects, error } = listing;

    objects.sort_by_key(|object| object.last_modified);

    let last_modified = match objects.last() {
        Some(object) => object.last_modified,
        None         => DateTime::UNIX_EPOCH,
    };

    let mut total_size     = 0;
    let mut size_per_owner = BTreeMap::new();

    for object in &objects {
        let owner = object.owner_id.as_deref().unwrap_or(UNKNOWN_OWNER);

        total_size += object.size;
        *size_per_owner.entry(owner.to_owned()).or_insert(0) += object.size;
    }

    let display_objects = display_subset(&objects, count);

    BucketReport {
        name:            bucket.name.to_owned(),
        creation_date:   bucket.creation_date,
        last_modified:   last_modified,
        total_size:      total_size,
        total_count:     objects.len() as u64,
        size_per_owner:  size_per_owner,
        display_objects: display_objects,
        error:           error,
    }
}

// Bound the ascending sorted listing to the objects selected for display.
fn display_subset(objects: &[ObjectSummary], count: i64) -> Vec<DisplayObject> {
    let take = (count.unsigned_abs() as usize).min(objects.len());

    let selected = if count < 0 {
        &objects[..take]
    }
    else {
        &objects[objects.len() - take..]
    };

    selected.iter()
        .map(|object| {
            DisplayObject {
                last_modified: object.last_modified,
                key:           object.key.to_owned(),
            }
        })
        .collect()
}
