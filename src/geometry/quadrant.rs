//! Quadrants of a bounding box

use std::fmt;

use super::bbox::BoundingBox;

/// Position of a quadrant relative to the midpoint of its parent box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadrantPosition {
    SouthWest,
    SouthEast,
    NorthEast,
    NorthWest,
}

impl QuadrantPosition {
    /// Short lowercase label, e.g. "sw"
    pub fn label(&self) -> &'static str {
        match self {
            QuadrantPosition::SouthWest => "sw",
            QuadrantPosition::SouthEast => "se",
            QuadrantPosition::NorthEast => "ne",
            QuadrantPosition::NorthWest => "nw",
        }
    }
}

/// One of the four rectangles a bounding box is split into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrant {
    /// Index 0..=3, used as the output name suffix
    pub index: usize,
    pub position: QuadrantPosition,
    pub bbox: BoundingBox,
}

impl Quadrant {
    pub fn new(index: usize, position: QuadrantPosition, bbox: BoundingBox) -> Self {
        Quadrant { index, position, bbox }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part {} ({}): {}", self.index, self.position.label(), self.bbox)
    }
}
