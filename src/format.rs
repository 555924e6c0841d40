// Report formatting
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use crate::analysis::BucketReport;
use crate::common::{
    HumanSize,
    SizeUnit,
};

/// How reports are rendered on the output stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// A multi line block per bucket.
    HumanReadable,

    /// One JSON document per bucket, one bucket per line.
    Json,
}

/// Render `report` in the selected format.
///
/// The returned string is a complete report, terminated by a newline, ready
/// to be written to the output stream in a single write.
pub fn format_report(report: &BucketReport, format: &OutputFormat, unit: &SizeUnit) -> String {
    let mut out = match format {
        OutputFormat::HumanReadable => text(report, unit),
        OutputFormat::Json          => json(report),
    };

    out.push('\n');
    out
}

// JSON format of a report.
fn json(report: &BucketReport) -> String {
    match serde_json::to_string(report) {
        Ok(json) => json,
        Err(err) => err.to_string(),
    }
}

// Human readable format of a report.
fn text(report: &BucketReport, unit: &SizeUnit) -> String {
    let total_size = report.total_size.humansize(unit);

    let mut out = String::new();

    out.push_str(&format!("Name: {}\n", report.name));
    out.push_str(&format!("ObjectCount: {}\n", report.total_count));
    out.push_str(&format!("TotalSize: {}\n", total_size));
    out.push_str(&format!("CreationDate: {}\n", rfc3339(&report.creation_date)));
    out.push_str(&format!("LastModified: {}\n", rfc3339(&report.last_modified)));
    out.push_str("Objects:\n");

    for object in &report.display_objects {
        out.push_str(&format!(" * {} {}\n", rfc3339(&object.last_modified), object.key));
    }

    out.push_str("TotalSizePerAccount:\n");

    for (owner, size) in &report.size_per_owner {
        out.push_str(&format!(" * {}/{} {}\n", size.humansize(unit), total_size, owner));
    }

    if let Some(error) = &report.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    out
}

fn rfc3339(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
