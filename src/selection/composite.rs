//! Composite images built by layering scenes
//!
//! Layers are stacked bottom to top and each layer overwrites every
//! pixel it covers, so the last layer wins. Scenes of a group are
//! therefore ordered from most to least cloudy before merging.

use log::{debug, info};

use crate::catalog::SceneRecord;
use crate::errors::{GrabError, GrabResult};
use crate::geometry::RegionOfInterest;
use crate::raster::{Band, GridSpec, MultiBandRaster};

/// Result of merging the scenes of one group
#[derive(Debug, Clone)]
pub struct CompositeImage {
    key: String,
    cloud_percentage: f64,
    mean_cloud_percentage: f64,
    scene_ids: Vec<String>,
    raster: MultiBandRaster,
}

/// Sort scenes into layering order: most cloudy first, least cloudy last
///
/// Equal cloud cover puts the older acquisition lower, then orders by id.
pub fn sort_for_layering(scenes: &mut [SceneRecord]) {
    scenes.sort_by(|a, b| {
        b.cloud_percentage().total_cmp(&a.cloud_percentage())
            .then_with(|| a.acquired().cmp(&b.acquired()))
            .then_with(|| a.id().cmp(b.id()))
    });
}

/// Stack rasters bottom to top onto the union of their grids
fn stack_layers<'r, I>(layers: I) -> GrabResult<MultiBandRaster>
where
    I: IntoIterator<Item = &'r MultiBandRaster>,
{
    let layers: Vec<&MultiBandRaster> = layers.into_iter().collect();
    let first = layers.first()
        .ok_or_else(|| GrabError::GenericError("Nothing to merge".to_string()))?;

    let mut grid: GridSpec = *first.grid();
    for layer in &layers[1..] {
        if layer.nodata() != first.nodata() {
            return Err(GrabError::GridMismatch(format!(
                "No-data values differ: {} vs {}", first.nodata(), layer.nodata())));
        }
        grid = grid.union(layer.grid())?;
    }

    let mut canvas = MultiBandRaster::filled(grid, first.bands(), first.nodata());
    for layer in &layers {
        canvas.overlay(layer)?;
    }

    Ok(canvas)
}

impl CompositeImage {
    /// Merge scenes sharing a grouping key
    ///
    /// The input order does not matter: scenes are re-sorted so the
    /// least cloudy one ends on top.
    pub fn merge(key: &str, scenes: &[SceneRecord], bands: &[Band]) -> GrabResult<CompositeImage> {
        if scenes.is_empty() {
            return Err(GrabError::GenericError(format!("Group '{}' has no scenes", key)));
        }

        let mut ordered = scenes.to_vec();
        sort_for_layering(&mut ordered);

        let mut layers = Vec::with_capacity(ordered.len());
        for scene in &ordered {
            debug!("Group {}: layering {} (cloud {:.2}%)", key, scene.id(), scene.cloud_percentage());
            layers.push(scene.load_pixels(bands)?);
        }
        let raster = stack_layers(&layers)?;

        let top = &ordered[ordered.len() - 1];
        let mean = ordered.iter().map(|s| s.cloud_percentage()).sum::<f64>() / ordered.len() as f64;

        info!("Composite {}: {} scenes, best cloud {:.2}%, mean {:.2}%",
              key, ordered.len(), top.cloud_percentage(), mean);

        Ok(CompositeImage {
            key: key.to_string(),
            cloud_percentage: top.cloud_percentage(),
            mean_cloud_percentage: mean,
            scene_ids: ordered.iter().map(|s| s.id().to_string()).collect(),
            raster,
        })
    }

    /// Mosaic several composites into one, first composite on top
    ///
    /// `composites` is expected best-first, as returned by the selector.
    pub fn mosaic(key: &str, composites: &[CompositeImage]) -> GrabResult<CompositeImage> {
        if composites.is_empty() {
            return Err(GrabError::GenericError(format!("Mosaic '{}' has no composites", key)));
        }

        let raster = stack_layers(composites.iter().rev().map(|c| &c.raster))?;

        let scene_ids = composites.iter()
            .rev()
            .flat_map(|c| c.scene_ids.iter().cloned())
            .collect::<Vec<_>>();
        let mean = composites.iter().map(|c| c.mean_cloud_percentage * c.scene_count() as f64).sum::<f64>()
            / scene_ids.len() as f64;

        info!("Mosaic {}: {} composites, {} scenes", key, composites.len(), scene_ids.len());

        Ok(CompositeImage {
            key: key.to_string(),
            cloud_percentage: composites[0].cloud_percentage,
            mean_cloud_percentage: mean,
            scene_ids,
            raster,
        })
    }

    /// Copy with every pixel outside the region set to no-data
    pub fn clipped_to(&self, region: &RegionOfInterest) -> CompositeImage {
        let mut clipped = self.clone();
        let masked = clipped.raster.mask_where(|center| region.contains(center));
        debug!("Clipped composite {}: {} covered pixels outside the region", self.key, masked);
        clipped
    }

    /// Grouping key (tile id, date or day of year)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cloud percentage of the top-most scene
    pub fn cloud_percentage(&self) -> f64 {
        self.cloud_percentage
    }

    pub fn mean_cloud_percentage(&self) -> f64 {
        self.mean_cloud_percentage
    }

    pub fn scene_count(&self) -> usize {
        self.scene_ids.len()
    }

    /// Contributing scene ids, bottom layer first
    pub fn scene_ids(&self) -> &[String] {
        &self.scene_ids
    }

    pub fn raster(&self) -> &MultiBandRaster {
        &self.raster
    }
}
