//! Local GeoTIFF export destination
//!
//! Writes each request to `<destination>/[folder/]<description>.tif`
//! on the composite's pixel lattice. Parts of the region the composite
//! does not cover are written as the fill value. Nothing is resampled or
//! reprojected: requests whose CRS differs from the composite grid are
//! refused.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::{debug, info, warn};

use super::backend::{ExportBackend, ExportTask};
use super::request::{ExportFormat, ExportRequest};
use crate::errors::{GrabError, GrabResult};
use crate::geometry::pixel_size_meters;
use crate::geotiff::{GdalMetadata, GeoTiffWriter};
use crate::raster::{Band, GridSpec, MultiBandRaster};

/// Reflectance mapped to full brightness in quicklooks
const QUICKLOOK_WHITE_POINT: f64 = 3000.0;

/// Backend writing GeoTIFF files into a directory
#[derive(Debug, Clone)]
pub struct LocalGeoTiffBackend {
    destination: PathBuf,
    quicklook: bool,
}

impl LocalGeoTiffBackend {
    pub fn new(destination: &Path) -> Self {
        LocalGeoTiffBackend {
            destination: destination.to_path_buf(),
            quicklook: false,
        }
    }

    /// Also write an 8-bit RGB PNG next to every GeoTIFF
    pub fn with_quicklook(mut self, quicklook: bool) -> Self {
        self.quicklook = quicklook;
        self
    }

    fn output_dir(&self, request: &ExportRequest) -> PathBuf {
        match &request.folder {
            Some(folder) => self.destination.join(folder),
            None => self.destination.clone(),
        }
    }
}

/// Prepared local export
pub struct LocalExportTask {
    request: ExportRequest,
    target: GridSpec,
    directory: PathBuf,
    quicklook: bool,
}

impl LocalExportTask {
    pub fn tiff_path(&self) -> PathBuf {
        self.directory.join(format!("{}.tif", self.request.description))
    }

    pub fn quicklook_path(&self) -> PathBuf {
        self.directory.join(format!("{}.png", self.request.description))
    }

    fn metadata(&self, raster: &MultiBandRaster) -> GdalMetadata {
        let image = &self.request.image;
        let mut metadata = GdalMetadata::new();

        metadata.add("COMPOSITE_KEY", image.key());
        metadata.add("SCENES", &image.scene_ids().join(","));
        metadata.add("CLOUDY_PIXEL_PERCENTAGE", &format!("{:.2}", image.cloud_percentage()));
        metadata.add("SCALE", &self.request.scale.to_string());
        if let Some(quadrant) = &self.request.quadrant {
            metadata.add("QUADRANT", quadrant.position.label());
        }
        for (i, band) in raster.bands().iter().enumerate() {
            metadata.add_band_description(i, band.name());
        }

        metadata
    }

    /// Composite pixels on the target grid
    fn target_raster(&self) -> GrabResult<MultiBandRaster> {
        let source = self.request.image.raster();

        match source.grid().window_for(&self.request.region) {
            Some(window) if window.width == self.target.width && window.height == self.target.height => {
                source.crop(&window)
            }
            _ => {
                let mut canvas = MultiBandRaster::filled(self.target, source.bands(), source.nodata());
                let written = canvas.overlay(source)?;
                debug!("{}: region only partly covered, {} of {} pixels from the composite",
                       self.request.description, written, self.target.pixel_count());
                Ok(canvas)
            }
        }
    }

    fn write_quicklook(&self, raster: &MultiBandRaster) -> GrabResult<()> {
        let grid = raster.grid();
        let (red, green, blue) = match (raster.band_data(Band::Red),
                                        raster.band_data(Band::Green),
                                        raster.band_data(Band::Blue)) {
            (Some(r), Some(g), Some(b)) => (r, g, b),
            _ => {
                warn!("Skipping quicklook for {}: RGB bands missing", self.request.description);
                return Ok(());
            }
        };

        let stretch = |v: i16| ((v.max(0) as f64 / QUICKLOOK_WHITE_POINT).min(1.0) * 255.0).round() as u8;
        let image = RgbImage::from_fn(grid.width, grid.height, |x, y| {
            let idx = y as usize * grid.width as usize + x as usize;
            if raster.is_covered(x, y) {
                Rgb([stretch(red[idx]), stretch(green[idx]), stretch(blue[idx])])
            } else {
                Rgb([0, 0, 0])
            }
        });

        image.save(self.quicklook_path())?;
        Ok(())
    }
}

impl ExportTask for LocalExportTask {
    fn description(&self) -> &str {
        &self.request.description
    }

    fn start(&mut self) -> GrabResult<()> {
        fs::create_dir_all(&self.directory)?;

        let raster = self.target_raster()?;
        let ExportFormat::GeoTiff { compression } = self.request.format;

        let path = self.tiff_path();
        let size = GeoTiffWriter::new(compression)
            .write_file(&path, &raster, self.request.fill_value, &self.metadata(&raster))?;
        info!("Exported {} ({}x{} px, {} bytes)", path.display(),
              raster.grid().width, raster.grid().height, size);

        if self.quicklook {
            self.write_quicklook(&raster)?;
        }

        Ok(())
    }
}

impl ExportBackend for LocalGeoTiffBackend {
    fn prepare(&self, request: ExportRequest) -> GrabResult<Box<dyn ExportTask + '_>> {
        let grid = *request.image.raster().grid();

        if grid.crs != request.crs {
            return Err(GrabError::ExportError(format!(
                "{}: composite is in {}, export requests {} and reprojection is not supported",
                request.description, grid.crs, request.crs)));
        }

        let target = grid.snapped_to(&request.region)
            .ok_or_else(|| GrabError::EmptyRegion(format!(
                "{}: region {} contains no pixel centre", request.description, request.region)))?;

        if target.pixel_count() > request.max_pixels {
            return Err(GrabError::TooManyPixels {
                requested: target.pixel_count(),
                limit: request.max_pixels,
            });
        }

        let native = pixel_size_meters(grid.pixel_width, &grid.crs);
        if (native - request.scale).abs() > request.scale * 0.01 {
            debug!("{}: native pixel size {:.2} m differs from requested scale {} m, exporting native grid",
                   request.description, native, request.scale);
        }

        Ok(Box::new(LocalExportTask {
            directory: self.output_dir(&request),
            request,
            target,
            quicklook: self.quicklook,
        }))
    }
}
