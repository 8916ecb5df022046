//! Scene catalog backed by a TOML manifest
//!
//! Each `[[scene]]` entry carries the scene metadata and a `bands`
//! table mapping band names to single-band images (16-bit grayscale
//! PNG or TIFF). Band images are only decoded when pixels are loaded.
//!
//! ```toml
//! [[scene]]
//! id = "20190603T084601_20190603T090101_T34HBH"
//! acquired = "2019-06-03T08:46:01Z"
//! cloud = 12.5
//! origin = [18.40, -33.80]
//! pixel_size = [0.0001, 0.0001]
//! size = [400, 300]
//!
//! [scene.bands]
//! B4 = "bands/34HBH_20190603_B4.png"
//! B3 = "bands/34HBH_20190603_B3.png"
//! B2 = "bands/34HBH_20190603_B2.png"
//! B8 = "bands/34HBH_20190603_B8.png"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use super::query::{CatalogQuery, InMemoryCatalog, SceneCatalog};
use super::scene::{PixelSource, SceneRecord};
use crate::errors::{GrabError, GrabResult};
use crate::geometry::CoordinateSystem;
use crate::raster::{Band, GridSpec, MultiBandRaster};

/// Band images of one scene on disk
pub struct BandImageSource {
    paths: Vec<(Band, PathBuf)>,
    nodata: i16,
}

impl BandImageSource {
    pub fn new(paths: Vec<(Band, PathBuf)>, nodata: i16) -> Self {
        BandImageSource { paths, nodata }
    }

    fn path_for(&self, band: Band) -> GrabResult<&Path> {
        self.paths.iter()
            .find(|(b, _)| *b == band)
            .map(|(_, path)| path.as_path())
            .ok_or_else(|| GrabError::ManifestError(format!("No image for band {}", band)))
    }
}

impl PixelSource for BandImageSource {
    fn load(&self, footprint: &GridSpec, bands: &[Band]) -> GrabResult<MultiBandRaster> {
        let mut data = Vec::with_capacity(bands.len());

        for band in bands {
            let path = self.path_for(*band)?;
            debug!("Decoding band {} from {}", band, path.display());

            let image = image::open(path)?.into_luma16();
            if image.width() != footprint.width || image.height() != footprint.height {
                return Err(GrabError::ManifestError(format!(
                    "{} is {}x{}, scene grid is {}x{}", path.display(),
                    image.width(), image.height(), footprint.width, footprint.height)));
            }

            // Sentinel-2 reflectances fit comfortably below i16::MAX
            let values = image.into_raw()
                .into_iter()
                .map(|v| v.min(i16::MAX as u16) as i16)
                .collect();
            data.push(values);
        }

        MultiBandRaster::from_bands(*footprint, bands.to_vec(), data, self.nodata)
    }
}

/// Catalog reading scene records from a manifest file
#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    inner: InMemoryCatalog,
}

impl ManifestCatalog {
    /// Load a manifest; band paths are relative to the manifest's directory
    pub fn from_file(path: &str) -> GrabResult<Self> {
        let content = fs::read_to_string(path)?;
        let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
        let catalog = Self::from_toml(&content, base_dir)?;
        info!("Loaded {} scenes from manifest {}", catalog.len(), path);
        Ok(catalog)
    }

    /// Parse a manifest from a TOML string
    pub fn from_toml(content: &str, base_dir: &Path) -> GrabResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| GrabError::ManifestError(format!("Failed to parse TOML: {}", e)))?;

        let entries = match toml_value.get("scene") {
            Some(value) => value.as_array()
                .ok_or_else(|| GrabError::ManifestError("'scene' must be an array of tables".to_string()))?
                .clone(),
            None => Vec::new(),
        };

        let mut inner = InMemoryCatalog::default();
        for (i, entry) in entries.iter().enumerate() {
            let scene = Self::parse_scene(entry, base_dir)
                .map_err(|e| GrabError::ManifestError(format!("scene #{}: {}", i, e)))?;
            inner.add(scene);
        }

        Ok(ManifestCatalog { inner })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn parse_scene(entry: &toml::Value, base_dir: &Path) -> GrabResult<SceneRecord> {
        let id = get_str(entry, "id")?;
        let acquired = parse_acquired(entry)?;
        let cloud = get_f64(entry, "cloud")?;

        let crs = match entry.get("crs").and_then(|v| v.as_str()) {
            Some(crs) => CoordinateSystem::from_string(crs)?,
            None => CoordinateSystem::WGS84,
        };

        let (origin_x, origin_y) = get_pair(entry, "origin")?;
        let (pixel_width, pixel_height) = get_pair(entry, "pixel_size")?;
        let (width, height) = get_pair(entry, "size")?;
        if width < 1.0 || height < 1.0 {
            return Err(GrabError::ManifestError(format!("{}: size must be at least 1x1", id)));
        }
        let footprint = GridSpec::new(origin_x, origin_y, pixel_width, pixel_height,
                                      width as u32, height as u32, crs)?;

        let nodata = match entry.get("nodata") {
            Some(value) => {
                let raw = value.as_integer()
                    .ok_or_else(|| GrabError::ManifestError(format!("{}: nodata must be an integer", id)))?;
                i16::try_from(raw).map_err(|_| GrabError::ManifestError(format!(
                    "{}: nodata {} does not fit a 16-bit sample", id, raw)))?
            }
            None => 0,
        };

        let band_table = entry.get("bands")
            .and_then(|v| v.as_table())
            .ok_or_else(|| GrabError::ManifestError(format!("{}: missing [bands] table", id)))?;

        let mut paths = Vec::new();
        for (name, value) in band_table {
            let band = Band::from_name(name)
                .ok_or_else(|| GrabError::ManifestError(format!("{}: unknown band '{}'", id, name)))?;
            let file = value.as_str()
                .ok_or_else(|| GrabError::ManifestError(format!("{}: band {} path must be a string", id, name)))?;
            paths.push((band, base_dir.join(file)));
        }

        let pixels = Arc::new(BandImageSource::new(paths, nodata));

        match entry.get("tile").and_then(|v| v.as_str()) {
            Some(tile) => SceneRecord::new(id, tile, acquired, cloud, footprint, pixels),
            None => SceneRecord::from_index(id, acquired, cloud, footprint, pixels),
        }
    }
}

impl SceneCatalog for ManifestCatalog {
    fn query(&self, query: &CatalogQuery) -> GrabResult<Vec<SceneRecord>> {
        self.inner.query(query)
    }
}

fn get_str<'v>(entry: &'v toml::Value, key: &str) -> GrabResult<&'v str> {
    entry.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| GrabError::ManifestError(format!("missing string field '{}'", key)))
}

fn as_f64(value: &toml::Value) -> Option<f64> {
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
}

fn get_f64(entry: &toml::Value, key: &str) -> GrabResult<f64> {
    entry.get(key)
        .and_then(as_f64)
        .ok_or_else(|| GrabError::ManifestError(format!("missing numeric field '{}'", key)))
}

fn get_pair(entry: &toml::Value, key: &str) -> GrabResult<(f64, f64)> {
    let values: Vec<f64> = entry.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(as_f64).collect())
        .unwrap_or_default();

    match values.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(GrabError::ManifestError(format!("'{}' must be a pair of numbers", key))),
    }
}

fn parse_acquired(entry: &toml::Value) -> GrabResult<DateTime<Utc>> {
    if let Some(text) = entry.get("acquired").and_then(|v| v.as_str()) {
        return DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| GrabError::ManifestError(format!("invalid timestamp '{}': {}", text, e)));
    }

    if let Some(millis) = entry.get("acquired_ms").and_then(|v| v.as_integer()) {
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| GrabError::ManifestError(format!("timestamp {} out of range", millis)));
    }

    Err(GrabError::ManifestError("missing 'acquired' or 'acquired_ms'".to_string()))
}
