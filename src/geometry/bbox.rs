//! Bounding box structure for defining regions

use std::fmt;

use super::point::Point;
use super::quadrant::{Quadrant, QuadrantPosition};

/// An axis-aligned bounding box
///
/// `min_x`/`min_y`/`max_x`/`max_y` are the west, south, east and north
/// bounds for geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate (west)
    pub min_x: f64,
    /// Minimum Y coordinate (south)
    pub min_y: f64,
    /// Maximum X coordinate (east)
    pub max_x: f64,
    /// Maximum Y coordinate (north)
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from west, south, east, north
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a bounding box from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> Result<Self, String> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err("Bounding box must have 4 comma-separated values".to_string());
        }

        let min_x = parts[0].trim().parse::<f64>()
            .map_err(|_| "Invalid min_x value".to_string())?;
        let min_y = parts[1].trim().parse::<f64>()
            .map_err(|_| "Invalid min_y value".to_string())?;
        let max_x = parts[2].trim().parse::<f64>()
            .map_err(|_| "Invalid max_x value".to_string())?;
        let max_y = parts[3].trim().parse::<f64>()
            .map_err(|_| "Invalid max_y value".to_string())?;

        Ok(BoundingBox::new(min_x, min_y, max_x, max_y))
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn is_finite(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y].iter().all(|v| v.is_finite())
    }

    /// True when the box has no positive extent on one of its axes
    pub fn is_degenerate(&self) -> bool {
        !(self.min_x < self.max_x && self.min_y < self.max_y)
    }

    /// Get the midpoint of the bounding box
    ///
    /// Computed as `(min + max) / 2` on each axis so that the quadrant
    /// split point is exact for symmetric inputs.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if this bounding box contains a point (edges included)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    /// Check whether two boxes share any area or edge
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x &&
            self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    /// Intersection of two boxes, if they overlap
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        Some(BoundingBox::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Create a buffer around a point (square buffer)
    pub fn from_point_buffer(center: &Point, buffer_size: f64) -> Self {
        BoundingBox::new(
            center.x - buffer_size,
            center.y - buffer_size,
            center.x + buffer_size,
            center.y + buffer_size,
        )
    }

    /// Split the box into four quadrants at its midpoint
    ///
    /// The quadrants are returned in the order SW, SE, NE, NW. Every
    /// corner is one of the min, mid or max values of the enclosing box,
    /// so the four rectangles share edges exactly and cover the box
    /// without gaps. A degenerate box yields degenerate quadrants.
    pub fn quadrants(&self) -> [Quadrant; 4] {
        let mid = self.center();

        [
            Quadrant::new(0, QuadrantPosition::SouthWest,
                          BoundingBox::new(self.min_x, self.min_y, mid.x, mid.y)),
            Quadrant::new(1, QuadrantPosition::SouthEast,
                          BoundingBox::new(mid.x, self.min_y, self.max_x, mid.y)),
            Quadrant::new(2, QuadrantPosition::NorthEast,
                          BoundingBox::new(mid.x, mid.y, self.max_x, self.max_y)),
            Quadrant::new(3, QuadrantPosition::NorthWest,
                          BoundingBox::new(self.min_x, mid.y, mid.x, self.max_y)),
        ]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}
