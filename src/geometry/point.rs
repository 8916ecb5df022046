//! Point structure for representing coordinates

/// A point in a coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (longitude in geographic systems)
    pub x: f64,
    /// Y coordinate (latitude in geographic systems)
    pub y: f64,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Parse a point from a string (format: "x,y")
    pub fn from_string(point_str: &str) -> Result<Self, String> {
        let parts: Vec<&str> = point_str.split(',').collect();
        if parts.len() != 2 {
            return Err(format!("Point must have 2 comma-separated values: '{}'", point_str));
        }

        let x = parts[0].trim().parse::<f64>()
            .map_err(|_| format!("Invalid x value in '{}'", point_str))?;
        let y = parts[1].trim().parse::<f64>()
            .map_err(|_| format!("Invalid y value in '{}'", point_str))?;

        Ok(Point::new(x, y))
    }
}
