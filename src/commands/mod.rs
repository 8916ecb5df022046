//! CLI command implementations
//!
//! This module contains implementations of the commands supported by
//! the CLI application using the Command pattern.

pub mod command_traits;
pub mod export_command;
pub mod plan_command;
pub mod quadrants_command;

pub use command_traits::{Command, CommandFactory};
pub use export_command::ExportCommand;
pub use plan_command::PlanCommand;
pub use quadrants_command::QuadrantsCommand;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};

use crate::catalog::ManifestCatalog;
use crate::config::RunConfig;
use crate::errors::{GrabError, GrabResult};

/// Command-line interface of the `scenegrab` binary
pub fn cli() -> ClapCommand {
    ClapCommand::new("scenegrab")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Select, composite and export Sentinel-2 chips around validation points")
        .arg(
            Arg::new("config")
                .help("Run configuration (TOML)")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .help("Scene manifest listing the available scenes (TOML)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("plan")
                .long("plan")
                .help("Print the export jobs without exporting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quadrants")
                .long("quadrants")
                .help("Print the four quadrants of a bounding box (minx,miny,maxx,maxy)")
                .value_name("BBOX")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory, overrides the configured destination")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write the log to this file as well as the console")
                .value_name("FILE")
                .required(false),
        )
}

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
#[derive(Default)]
pub struct ScenegrabCommandFactory;

impl ScenegrabCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ScenegrabCommandFactory
    }
}

impl CommandFactory for ScenegrabCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> GrabResult<Box<dyn Command>> {
        if args.contains_id("quadrants") {
            Ok(Box::new(QuadrantsCommand::new(args)?))
        } else if args.get_flag("plan") {
            Ok(Box::new(PlanCommand::new(args)?))
        } else {
            // Default to exporting
            Ok(Box::new(ExportCommand::new(args)?))
        }
    }
}

/// Configuration and catalog named on the command line
fn load_run_inputs(args: &ArgMatches) -> GrabResult<(RunConfig, ManifestCatalog)> {
    let config_path = args.get_one::<String>("config")
        .ok_or_else(|| GrabError::ConfigError("Missing configuration file".to_string()))?;
    let manifest_path = args.get_one::<String>("manifest")
        .ok_or_else(|| GrabError::ConfigError("Missing scene manifest (--manifest)".to_string()))?;

    let config = RunConfig::from_file(config_path)?;
    let catalog = ManifestCatalog::from_file(manifest_path)?;
    Ok((config, catalog))
}
