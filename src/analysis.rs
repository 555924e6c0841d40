// Per bucket analysis
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// The analyzer itself.
mod analyzer;

/// Analysis result types.
mod report;

pub use analyzer::*;
pub use report::*;
