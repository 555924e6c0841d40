// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bucket;
mod bucket_lister;
mod client_config;
mod human_size;
mod object;
mod region;
mod size_unit;

pub use bucket::*;
pub use bucket_lister::*;
pub use client_config::*;
pub use human_size::*;
pub use object::*;
pub use region::*;
pub use size_unit::*;
