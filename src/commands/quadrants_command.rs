//! Quadrant listing command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::errors::{GrabError, GrabResult};
use crate::geometry::BoundingBox;

/// Command printing the four quadrants of a bounding box
pub struct QuadrantsCommand {
    bbox: BoundingBox,
}

impl QuadrantsCommand {
    pub fn new(args: &ArgMatches) -> GrabResult<Self> {
        let bbox_str = args.get_one::<String>("quadrants")
            .ok_or_else(|| GrabError::GenericError("Missing bounding box".to_string()))?;
        let bbox = BoundingBox::from_string(bbox_str).map_err(GrabError::ConfigError)?;

        Ok(QuadrantsCommand { bbox })
    }
}

impl Command for QuadrantsCommand {
    fn execute(&self) -> GrabResult<()> {
        if self.bbox.is_degenerate() {
            info!("Bounding box {} has zero area, quadrants are degenerate", self.bbox);
        }

        info!("Quadrants of {}:", self.bbox);
        for quadrant in self.bbox.quadrants() {
            info!("  {}", quadrant);
        }
        Ok(())
    }
}
