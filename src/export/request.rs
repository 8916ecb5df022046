//! Export job specifications

use std::fmt;
use std::sync::Arc;

use crate::compression::CompressionKind;
use crate::geometry::{BoundingBox, CoordinateSystem, Quadrant, METERS_PER_DEGREE};
use crate::selection::CompositeImage;

/// Output container of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    GeoTiff { compression: CompressionKind },
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::GeoTiff { compression } => write!(f, "GeoTIFF ({})", compression),
        }
    }
}

/// Settings shared by every request of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Metres per output pixel
    pub scale: f64,
    pub crs: CoordinateSystem,
    /// Jobs needing more pixels than this are refused
    pub max_pixels: u64,
    pub format: ExportFormat,
    /// Value written where the composite has no data
    pub fill_value: i16,
    /// Sub-folder of the export destination
    pub folder: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            scale: 10.0,
            crs: CoordinateSystem::WGS84,
            max_pixels: 200_000_000,
            format: ExportFormat::GeoTiff { compression: CompressionKind::Deflate },
            fill_value: 0,
            folder: None,
        }
    }
}

/// One export job, immutable once built
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Output name, also used as the task description
    pub description: String,
    pub image: Arc<CompositeImage>,
    /// Area to export: the ROI bounds or one quadrant
    pub region: BoundingBox,
    pub quadrant: Option<Quadrant>,
    pub scale: f64,
    pub crs: CoordinateSystem,
    pub max_pixels: u64,
    pub format: ExportFormat,
    pub fill_value: i16,
    pub folder: Option<String>,
}

impl ExportRequest {
    pub fn new(description: &str,
               image: Arc<CompositeImage>,
               region: BoundingBox,
               quadrant: Option<Quadrant>,
               settings: &ExportSettings) -> Self {
        ExportRequest {
            description: description.to_string(),
            image,
            region,
            quadrant,
            scale: settings.scale,
            crs: settings.crs,
            max_pixels: settings.max_pixels,
            format: settings.format,
            fill_value: settings.fill_value,
            folder: settings.folder.clone(),
        }
    }

    /// Approximate pixel count of the region at the requested scale
    pub fn estimated_pixels(&self) -> u64 {
        let (width_m, height_m) = if self.crs.is_geographic() {
            let mid_lat = self.region.center().y.to_radians();
            (self.region.width() * METERS_PER_DEGREE * mid_lat.cos(),
             self.region.height() * METERS_PER_DEGREE)
        } else {
            (self.region.width(), self.region.height())
        };

        let cols = (width_m / self.scale).ceil().max(0.0) as u64;
        let rows = (height_m / self.scale).ceil().max(0.0) as u64;
        cols * rows
    }
}

impl fmt::Display for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: composite {} ({} scenes), region {}, {} m, {}, {}, fill {}",
               self.description, self.image.key(), self.image.scene_count(),
               self.region, self.scale, self.crs, self.format, self.fill_value)
    }
}
