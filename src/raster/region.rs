//! Region structure for defining a pixel window
//!
//! Coordinates are in pixels with (0,0) at the top-left corner of the
//! grid.

/// Rectangular pixel window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Get the rightmost X coordinate (exclusive)
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
