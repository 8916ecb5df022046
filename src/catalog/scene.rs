//! Scene records returned by a catalog

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use super::tile;
use crate::errors::{GrabError, GrabResult};
use crate::raster::{Band, GridSpec, MultiBandRaster};

/// Deferred access to the pixels of one scene
pub trait PixelSource: Send + Sync {
    /// Load the requested bands on the scene's footprint grid
    fn load(&self, footprint: &GridSpec, bands: &[Band]) -> GrabResult<MultiBandRaster>;
}

/// Pixels already held in memory
pub struct InMemoryPixels {
    raster: MultiBandRaster,
}

impl InMemoryPixels {
    pub fn new(raster: MultiBandRaster) -> Self {
        InMemoryPixels { raster }
    }
}

impl PixelSource for InMemoryPixels {
    fn load(&self, _footprint: &GridSpec, bands: &[Band]) -> GrabResult<MultiBandRaster> {
        self.raster.select_bands(bands)
    }
}

/// One satellite pass over the area of interest
#[derive(Clone)]
pub struct SceneRecord {
    id: String,
    tile: String,
    acquired: DateTime<Utc>,
    cloud_percentage: f64,
    footprint: GridSpec,
    pixels: Arc<dyn PixelSource>,
}

impl SceneRecord {
    /// Create a scene record
    ///
    /// The tile id must be a valid MGRS tile and the cloud percentage
    /// must lie in 0..=100.
    pub fn new(id: &str,
               tile: &str,
               acquired: DateTime<Utc>,
               cloud_percentage: f64,
               footprint: GridSpec,
               pixels: Arc<dyn PixelSource>) -> GrabResult<Self> {
        if !tile::is_valid_tile(tile) {
            return Err(GrabError::InvalidScene(format!("{}: invalid MGRS tile '{}'", id, tile)));
        }

        if !(0.0..=100.0).contains(&cloud_percentage) {
            return Err(GrabError::InvalidScene(format!(
                "{}: cloud percentage {} outside 0..=100", id, cloud_percentage)));
        }

        Ok(SceneRecord {
            id: id.to_string(),
            tile: tile.to_string(),
            acquired,
            cloud_percentage,
            footprint,
            pixels,
        })
    }

    /// Create a record whose tile is read from the catalog index
    pub fn from_index(id: &str,
                      acquired: DateTime<Utc>,
                      cloud_percentage: f64,
                      footprint: GridSpec,
                      pixels: Arc<dyn PixelSource>) -> GrabResult<Self> {
        let tile = tile::tile_from_index(id)
            .ok_or_else(|| GrabError::InvalidScene(format!("No MGRS tile in index '{}'", id)))?;
        Self::new(id, &tile, acquired, cloud_percentage, footprint, pixels)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tile(&self) -> &str {
        &self.tile
    }

    pub fn acquired(&self) -> DateTime<Utc> {
        self.acquired
    }

    pub fn cloud_percentage(&self) -> f64 {
        self.cloud_percentage
    }

    pub fn footprint(&self) -> &GridSpec {
        &self.footprint
    }

    /// Acquisition date as "YYYY-MM-DD"
    pub fn formatted_date(&self) -> String {
        self.acquired.format("%Y-%m-%d").to_string()
    }

    /// Acquisition day of year, 1-based
    pub fn day_of_year(&self) -> u32 {
        self.acquired.ordinal()
    }

    /// Fetch the scene's pixels for the given bands
    pub fn load_pixels(&self, bands: &[Band]) -> GrabResult<MultiBandRaster> {
        let raster = self.pixels.load(&self.footprint, bands)?;
        if raster.grid() != &self.footprint {
            return Err(GrabError::InvalidScene(format!(
                "{}: loaded pixels do not match the scene footprint", self.id)));
        }
        Ok(raster)
    }
}

impl fmt::Debug for SceneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRecord")
            .field("id", &self.id)
            .field("tile", &self.tile)
            .field("acquired", &self.acquired)
            .field("cloud_percentage", &self.cloud_percentage)
            .field("footprint", &self.footprint)
            .finish()
    }
}
