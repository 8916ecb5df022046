//! GeoTIFF encoding for local exports
//!
//! This module writes the int16 multi-band GeoTIFFs produced by the
//! local export backend.

pub(crate) mod constants;
mod entry;
mod metadata;
mod writer;
#[cfg(test)]
mod tests;

pub use entry::{TagEntry, TagValue};
pub use metadata::GdalMetadata;
pub use writer::{align_to_4_bytes, geo_key_directory, rows_per_strip, GeoTiffWriter};
