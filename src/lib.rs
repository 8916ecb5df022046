pub mod api;
pub mod catalog;
pub mod commands;
pub mod compression;
pub mod config;
pub mod errors;
pub mod export;
pub mod geometry;
pub mod geotiff;
pub mod raster;
pub mod selection;
pub mod utils;

pub use crate::api::{RunSummary, SceneGrabber};

pub use catalog::{CatalogQuery, DateWindow, InMemoryCatalog, ManifestCatalog, SceneCatalog, SceneRecord};
pub use config::{OutputMode, RunConfig};
pub use errors::{GrabError, GrabResult};
pub use export::{build_export_requests, submit_requests, ExportBackend, ExportRequest, ExportSettings};
pub use geometry::{BoundingBox, CoordinateSystem, Point, Quadrant, RegionOfInterest};
pub use selection::{select_best_composites, CompositeImage, GroupingKey, RankingMetric};
