//! Geometry handling for regions of interest
//!
//! This module provides points, bounding boxes, quadrant splitting,
//! point buffering and the region of interest built from them.

mod bbox;
mod buffer;
mod crs;
mod point;
mod quadrant;
mod roi;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::buffer::{buffer_point, pixel_size_meters, METERS_PER_DEGREE};
pub use self::crs::CoordinateSystem;
pub use self::point::Point;
pub use self::quadrant::{Quadrant, QuadrantPosition};
pub use self::roi::RegionOfInterest;
