//! Georeferenced pixel grids
//!
//! A grid is described by the map coordinates of its top-left corner,
//! a positive pixel size on each axis and its dimensions. Rows run from
//! north to south.

use log::trace;

use super::region::Region;
use crate::errors::{GrabError, GrabResult};
use crate::geometry::{BoundingBox, CoordinateSystem, Point};

/// Relative tolerance when comparing pixel sizes
const PIXEL_SIZE_TOLERANCE: f64 = 1e-9;

/// Tolerance, in pixels, for grid origins to count as aligned
const ALIGNMENT_TOLERANCE: f64 = 1e-6;

/// Pixel lattice of a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// X coordinate of the left edge
    pub origin_x: f64,
    /// Y coordinate of the top edge
    pub origin_y: f64,
    /// Pixel width in CRS units
    pub pixel_width: f64,
    /// Pixel height in CRS units, positive
    pub pixel_height: f64,
    pub width: u32,
    pub height: u32,
    pub crs: CoordinateSystem,
}

impl GridSpec {
    pub fn new(origin_x: f64, origin_y: f64,
               pixel_width: f64, pixel_height: f64,
               width: u32, height: u32,
               crs: CoordinateSystem) -> GrabResult<Self> {
        if !(pixel_width > 0.0 && pixel_height > 0.0) {
            return Err(GrabError::GridMismatch(format!(
                "Pixel size must be positive, got {}x{}", pixel_width, pixel_height)));
        }

        Ok(GridSpec {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            width,
            height,
            crs,
        })
    }

    /// Map extent covered by the grid
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(
            self.origin_x,
            self.origin_y - self.height as f64 * self.pixel_height,
            self.origin_x + self.width as f64 * self.pixel_width,
            self.origin_y,
        )
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Map coordinates of a pixel centre
    pub fn pixel_center(&self, col: u32, row: u32) -> Point {
        Point::new(
            self.origin_x + (col as f64 + 0.5) * self.pixel_width,
            self.origin_y - (row as f64 + 0.5) * self.pixel_height,
        )
    }

    /// Fractional column and row bounds of the pixel centres inside `bbox`
    ///
    /// Centres on the east and south edges are excluded, so adjacent
    /// boxes sharing an edge never claim the same pixel.
    fn centre_bounds(&self, bbox: &BoundingBox) -> (f64, f64, f64, f64) {
        (
            ((bbox.min_x - self.origin_x) / self.pixel_width - 0.5).ceil(),
            ((bbox.max_x - self.origin_x) / self.pixel_width - 0.5).ceil(),
            ((self.origin_y - bbox.max_y) / self.pixel_height - 0.5).ceil(),
            ((self.origin_y - bbox.min_y) / self.pixel_height - 0.5).ceil(),
        )
    }

    /// Pixel window whose centres fall inside a bounding box
    ///
    /// Returns `None` when no pixel centre of this grid falls inside
    /// the box.
    pub fn window_for(&self, bbox: &BoundingBox) -> Option<Region> {
        let (col_start, col_end, row_start, row_end) = self.centre_bounds(bbox);

        let clamp_cols = |v: f64| v.max(0.0).min(self.width as f64) as u32;
        let clamp_rows = |v: f64| v.max(0.0).min(self.height as f64) as u32;

        let (x0, x1) = (clamp_cols(col_start), clamp_cols(col_end));
        let (y0, y1) = (clamp_rows(row_start), clamp_rows(row_end));

        trace!("Window for {}: cols {}..{}, rows {}..{}", bbox, x0, x1, y0, y1);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Region::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Grid on this lattice whose pixel centres fall inside a bounding box
    ///
    /// Unlike [`GridSpec::window_for`] the result may reach past this
    /// grid's extent.
    pub fn snapped_to(&self, bbox: &BoundingBox) -> Option<GridSpec> {
        let (col_start, col_end, row_start, row_end) = self.centre_bounds(bbox);
        if col_end <= col_start || row_end <= row_start {
            return None;
        }

        Some(GridSpec {
            origin_x: self.origin_x + col_start * self.pixel_width,
            origin_y: self.origin_y - row_start * self.pixel_height,
            width: (col_end - col_start) as u32,
            height: (row_end - row_start) as u32,
            ..*self
        })
    }

    /// Grid covering a pixel window of this grid
    pub fn sub_grid(&self, region: &Region) -> GridSpec {
        GridSpec {
            origin_x: self.origin_x + region.x as f64 * self.pixel_width,
            origin_y: self.origin_y - region.y as f64 * self.pixel_height,
            width: region.width,
            height: region.height,
            ..*self
        }
    }

    /// Check that two grids share CRS, pixel size and pixel alignment
    pub fn check_same_lattice(&self, other: &GridSpec) -> GrabResult<()> {
        if self.crs != other.crs {
            return Err(GrabError::GridMismatch(format!(
                "CRS differs: {} vs {}", self.crs, other.crs)));
        }

        let same_size = |a: f64, b: f64| (a - b).abs() <= PIXEL_SIZE_TOLERANCE * a.abs().max(b.abs());
        if !same_size(self.pixel_width, other.pixel_width) || !same_size(self.pixel_height, other.pixel_height) {
            return Err(GrabError::GridMismatch(format!(
                "Pixel size differs: {}x{} vs {}x{}",
                self.pixel_width, self.pixel_height, other.pixel_width, other.pixel_height)));
        }

        self.offset_of(other).map(|_| ())
    }

    /// Column and row of `other`'s top-left pixel in this grid
    ///
    /// The offset may be negative when `other` starts west or north of
    /// this grid.
    pub fn offset_of(&self, other: &GridSpec) -> GrabResult<(i64, i64)> {
        let dx = (other.origin_x - self.origin_x) / self.pixel_width;
        let dy = (self.origin_y - other.origin_y) / self.pixel_height;

        if (dx - dx.round()).abs() > ALIGNMENT_TOLERANCE || (dy - dy.round()).abs() > ALIGNMENT_TOLERANCE {
            return Err(GrabError::GridMismatch(format!(
                "Grid origins are not aligned to whole pixels (offset {:.6}, {:.6})", dx, dy)));
        }

        Ok((dx.round() as i64, dy.round() as i64))
    }

    /// Smallest grid on the same lattice covering both grids
    pub fn union(&self, other: &GridSpec) -> GrabResult<GridSpec> {
        self.check_same_lattice(other)?;
        let (col, row) = self.offset_of(other)?;

        let min_col = col.min(0);
        let min_row = row.min(0);
        let max_col = (col + other.width as i64).max(self.width as i64);
        let max_row = (row + other.height as i64).max(self.height as i64);

        Ok(GridSpec {
            origin_x: self.origin_x + min_col as f64 * self.pixel_width,
            origin_y: self.origin_y - min_row as f64 * self.pixel_height,
            width: (max_col - min_col) as u32,
            height: (max_row - min_row) as u32,
            ..*self
        })
    }
}
