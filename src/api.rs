use std::sync::Arc;

use log::{info, warn};

use crate::catalog::{CatalogQuery, DateWindow, SceneCatalog};
use crate::config::{OutputMode, RunConfig};
use crate::errors::GrabResult;
use crate::export::{build_export_requests, submit_requests, ExportBackend, ExportRequest};
use crate::geometry::RegionOfInterest;
use crate::selection::CompositeImage;

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Months that produced at least one export
    pub months_exported: Vec<u32>,
    /// Months without any matching scene
    pub months_skipped: Vec<u32>,
    /// Descriptions of the started export jobs, in start order
    pub started: Vec<String>,
}

/// Main interface to the scenegrab library
///
/// Runs the month-by-month pipeline: query the catalog, select and
/// merge the best groups, clip to the region and export.
pub struct SceneGrabber<'c> {
    config: RunConfig,
    catalog: &'c dyn SceneCatalog,
    region: RegionOfInterest,
}

impl<'c> SceneGrabber<'c> {
    /// Create a grabber over a catalog
    ///
    /// # Arguments
    /// * `config` - Validated run configuration
    /// * `catalog` - Source of scene records
    ///
    /// # Returns
    /// A SceneGrabber or an error if the region of interest is invalid
    pub fn new(config: RunConfig, catalog: &'c dyn SceneCatalog) -> GrabResult<Self> {
        config.validate()?;
        let region = config.region_of_interest()?;
        info!("Region of interest {} ({} rectangles, {})",
              region.bounds(), region.rectangles().len(), region.crs());

        Ok(SceneGrabber { config, catalog, region })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn region(&self) -> &RegionOfInterest {
        &self.region
    }

    /// Composites to export for one month, with their output base names
    ///
    /// Empty when the catalog has no scene for the month.
    pub fn composites_for_month(&self, month: u32) -> GrabResult<Vec<(String, CompositeImage)>> {
        let window = DateWindow::for_month(self.config.year, month)?;
        let scenes = self.catalog.query(&CatalogQuery::new(window, self.region.clone()))?;
        if scenes.is_empty() {
            warn!("No scenes for {}, skipping month {}", window, month);
            return Ok(Vec::new());
        }

        let selected = self.config.selection_policy().apply(&scenes)?;
        if selected.is_empty() {
            warn!("No scene of {} passed selection, skipping month {}", window, month);
            return Ok(Vec::new());
        }

        let base_name = self.config.base_name(month);
        let outputs = match self.config.output_mode {
            OutputMode::Mosaic => {
                let mosaic = CompositeImage::mosaic(&base_name, &selected)?;
                vec![(base_name, mosaic.clipped_to(&self.region))]
            }
            OutputMode::PerComposite => selected.iter()
                .map(|composite| (format!("{}_{}", base_name, composite.key()),
                                  composite.clipped_to(&self.region)))
                .collect(),
        };

        Ok(outputs)
    }

    /// Export requests for one month, nothing submitted
    pub fn plan_month(&self, month: u32) -> GrabResult<Vec<ExportRequest>> {
        let mut requests = Vec::new();
        for (name, composite) in self.composites_for_month(month)? {
            let composite = Arc::new(composite);
            requests.extend(build_export_requests(&composite, &self.region,
                                                  self.config.split_quadrants, &self.config.export, &name));
        }
        Ok(requests)
    }

    /// Export requests for every configured month
    pub fn plan(&self) -> GrabResult<Vec<ExportRequest>> {
        let mut requests = Vec::new();
        for month in &self.config.months {
            requests.extend(self.plan_month(*month)?);
        }
        Ok(requests)
    }

    /// Build and submit the exports of every configured month
    ///
    /// Jobs are started and not waited on. The first error stops the run.
    pub fn run(&self, backend: &dyn ExportBackend) -> GrabResult<RunSummary> {
        let mut summary = RunSummary::default();

        for month in &self.config.months {
            let requests = self.plan_month(*month)?;
            if requests.is_empty() {
                summary.months_skipped.push(*month);
                continue;
            }

            summary.started.extend(submit_requests(requests, backend)?);
            summary.months_exported.push(*month);
        }

        info!("Started {} export jobs for {} months ({} skipped)",
              summary.started.len(), summary.months_exported.len(), summary.months_skipped.len());
        Ok(summary)
    }
}
