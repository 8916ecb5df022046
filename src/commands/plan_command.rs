//! Dry-run command listing the export jobs a run would start

use clap::ArgMatches;
use log::info;

use crate::api::SceneGrabber;
use crate::catalog::ManifestCatalog;
use crate::commands::command_traits::Command;
use crate::commands::load_run_inputs;
use crate::config::RunConfig;
use crate::errors::GrabResult;

/// Command printing export requests without submitting them
pub struct PlanCommand {
    config: RunConfig,
    catalog: ManifestCatalog,
}

impl PlanCommand {
    pub fn new(args: &ArgMatches) -> GrabResult<Self> {
        let (config, catalog) = load_run_inputs(args)?;
        Ok(PlanCommand { config, catalog })
    }
}

impl Command for PlanCommand {
    fn execute(&self) -> GrabResult<()> {
        let grabber = SceneGrabber::new(self.config.clone(), &self.catalog)?;
        let requests = grabber.plan()?;

        info!("{} export jobs planned:", requests.len());
        for request in &requests {
            info!("  {}", request);
            info!("    ~{} pixels at {} m (limit {})",
                  request.estimated_pixels(), request.scale, request.max_pixels);
        }
        Ok(())
    }
}
