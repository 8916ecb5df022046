//! Georeferenced raster data
//!
//! Grids, pixel windows and the four-band int16 rasters that scenes
//! and composites carry.

mod band;
mod grid;
mod multiband;
mod region;

pub use band::Band;
pub use grid::GridSpec;
pub use multiband::MultiBandRaster;
pub use region::Region;
