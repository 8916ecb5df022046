//! Run configuration
//!
//! A run is described by a TOML file with four optional tables. Missing
//! keys fall back to the defaults of [`RunConfig::default`].
//!
//! ```toml
//! [run]
//! year = 2019
//! months = [6, 7]
//! output_prefix = "RGB"
//!
//! [region]
//! crs = "EPSG:4326"
//! buffer_meters = 1000
//! points = [[18.42, -33.93], [18.61, -33.87]]
//!
//! [selection]
//! grouping = "mgrs_tile"
//! ranking = "best_cloud"
//! max_composites = 3
//! max_cloud_percentage = 40
//!
//! [export]
//! output = "mosaic"
//! split_quadrants = true
//! scale = 10
//! crs = "EPSG:4326"
//! max_pixels = 200000000
//! fill_value = 0
//! compression = "deflate"
//! destination = "exports"
//! ```

mod run;

pub use run::{OutputMode, RegionSource, RunConfig};
