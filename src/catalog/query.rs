//! Catalog query interface

use log::{debug, info};

use super::scene::SceneRecord;
use super::window::DateWindow;
use crate::errors::GrabResult;
use crate::geometry::RegionOfInterest;
use crate::raster::Band;

/// Filter applied to a scene catalog
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub window: DateWindow,
    pub region: RegionOfInterest,
    pub bands: Vec<Band>,
}

impl CatalogQuery {
    pub fn new(window: DateWindow, region: RegionOfInterest) -> Self {
        CatalogQuery {
            window,
            region,
            bands: Band::EXPORT_SET.to_vec(),
        }
    }

    /// Whether a scene was acquired in the window and touches the region
    pub fn matches(&self, scene: &SceneRecord) -> bool {
        self.window.contains(&scene.acquired())
            && scene.footprint().crs == self.region.crs()
            && self.region.intersects(&scene.footprint().bbox())
    }
}

/// Source of scene records
pub trait SceneCatalog {
    /// Scenes matching the query, in catalog order
    fn query(&self, query: &CatalogQuery) -> GrabResult<Vec<SceneRecord>>;
}

/// Catalog over a fixed list of records
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    scenes: Vec<SceneRecord>,
}

impl InMemoryCatalog {
    pub fn new(scenes: Vec<SceneRecord>) -> Self {
        InMemoryCatalog { scenes }
    }

    pub fn add(&mut self, scene: SceneRecord) {
        self.scenes.push(scene);
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl SceneCatalog for InMemoryCatalog {
    fn query(&self, query: &CatalogQuery) -> GrabResult<Vec<SceneRecord>> {
        let matches: Vec<SceneRecord> = self.scenes.iter()
            .filter(|scene| query.matches(scene))
            .cloned()
            .collect();

        for scene in &matches {
            debug!("Matched scene {} (tile {}, {}, cloud {:.2}%)",
                   scene.id(), scene.tile(), scene.formatted_date(), scene.cloud_percentage());
        }
        info!("Catalog query {} matched {} of {} scenes", query.window, matches.len(), self.scenes.len());

        Ok(matches)
    }
}
