//! Region of interest made of rectangles

use log::debug;

use super::bbox::BoundingBox;
use super::buffer::buffer_point;
use super::crs::CoordinateSystem;
use super::point::Point;
use crate::errors::{GrabError, GrabResult};

/// Union of rectangles to clip and export
#[derive(Debug, Clone)]
pub struct RegionOfInterest {
    rectangles: Vec<BoundingBox>,
    bounds: BoundingBox,
    crs: CoordinateSystem,
}

impl RegionOfInterest {
    /// Build a region from pre-built rectangles
    pub fn from_rectangles(rectangles: Vec<BoundingBox>, crs: CoordinateSystem) -> GrabResult<Self> {
        let bounds = rectangles.iter()
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
            .ok_or_else(|| GrabError::ConfigError("Region of interest needs at least one rectangle".to_string()))?;

        debug!("Region of interest: {} rectangles, bounds {}", rectangles.len(), bounds);

        Ok(RegionOfInterest { rectangles, bounds, crs })
    }

    /// Build a region by buffering each point by `radius_meters`
    pub fn from_points(points: &[Point], radius_meters: f64, crs: CoordinateSystem) -> GrabResult<Self> {
        if radius_meters <= 0.0 {
            return Err(GrabError::ConfigError(format!("Buffer radius must be positive, got {}", radius_meters)));
        }

        let rectangles = points.iter()
            .map(|point| buffer_point(point, radius_meters, &crs))
            .collect();

        Self::from_rectangles(rectangles, crs)
    }

    pub fn rectangles(&self) -> &[BoundingBox] {
        &self.rectangles
    }

    /// Enclosing bounding box of all rectangles
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    /// Whether the point lies in any of the rectangles
    pub fn contains(&self, point: &Point) -> bool {
        self.rectangles.iter().any(|rect| rect.contains(point))
    }

    /// Whether the box touches any of the rectangles
    pub fn intersects(&self, bbox: &BoundingBox) -> bool {
        self.bounds.intersects(bbox) && self.rectangles.iter().any(|rect| rect.intersects(bbox))
    }
}
