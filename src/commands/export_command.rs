//! Export command writing GeoTIFFs to a local directory

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::api::SceneGrabber;
use crate::catalog::ManifestCatalog;
use crate::commands::command_traits::Command;
use crate::commands::load_run_inputs;
use crate::config::RunConfig;
use crate::errors::GrabResult;
use crate::export::LocalGeoTiffBackend;

/// Command running the full pipeline against the local backend
pub struct ExportCommand {
    config: RunConfig,
    catalog: ManifestCatalog,
    destination: PathBuf,
}

impl ExportCommand {
    /// Create a new export command
    ///
    /// `--output` overrides the configured destination directory.
    pub fn new(args: &ArgMatches) -> GrabResult<Self> {
        let (config, catalog) = load_run_inputs(args)?;
        let destination = args.get_one::<String>("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| config.destination.clone());

        Ok(ExportCommand { config, catalog, destination })
    }
}

impl Command for ExportCommand {
    fn execute(&self) -> GrabResult<()> {
        let grabber = SceneGrabber::new(self.config.clone(), &self.catalog)?;
        let backend = LocalGeoTiffBackend::new(&self.destination)
            .with_quicklook(self.config.quicklook);

        let summary = grabber.run(&backend)?;

        info!("Export complete: {} files in {}", summary.started.len(), self.destination.display());
        if !summary.months_skipped.is_empty() {
            info!("Months without scenes: {:?}", summary.months_skipped);
        }
        Ok(())
    }
}
