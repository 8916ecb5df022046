//! Multi-band int16 rasters

use log::debug;

use super::band::Band;
use super::grid::GridSpec;
use super::region::Region;
use crate::errors::{GrabError, GrabResult};
use crate::geometry::Point;

/// Band-sequential raster with a shared no-data value
///
/// A pixel is covered when at least one band differs from `nodata`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBandRaster {
    grid: GridSpec,
    bands: Vec<Band>,
    data: Vec<Vec<i16>>,
    nodata: i16,
}

impl MultiBandRaster {
    /// Raster where every pixel is `nodata`
    pub fn filled(grid: GridSpec, bands: &[Band], nodata: i16) -> Self {
        let len = grid.pixel_count() as usize;
        MultiBandRaster {
            grid,
            bands: bands.to_vec(),
            data: vec![vec![nodata; len]; bands.len()],
            nodata,
        }
    }

    /// Wrap existing band buffers, one row-major buffer per band
    pub fn from_bands(grid: GridSpec, bands: Vec<Band>, data: Vec<Vec<i16>>, nodata: i16) -> GrabResult<Self> {
        if bands.len() != data.len() {
            return Err(GrabError::GenericError(format!(
                "{} bands declared but {} buffers given", bands.len(), data.len())));
        }

        let expected = grid.pixel_count() as usize;
        if let Some((band, buffer)) = bands.iter().zip(&data).find(|(_, buf)| buf.len() != expected) {
            return Err(GrabError::GenericError(format!(
                "Band {} has {} values, grid needs {}", band, buffer.len(), expected)));
        }

        Ok(MultiBandRaster { grid, bands, data, nodata })
    }

    /// Copy restricted to `bands`, in the requested order
    pub fn select_bands(&self, bands: &[Band]) -> GrabResult<MultiBandRaster> {
        let mut data = Vec::with_capacity(bands.len());
        for band in bands {
            let values = self.band_data(*band)
                .ok_or_else(|| GrabError::GenericError(format!("Raster has no band {}", band)))?;
            data.push(values.to_vec());
        }

        Ok(MultiBandRaster {
            grid: self.grid,
            bands: bands.to_vec(),
            data,
            nodata: self.nodata,
        })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn nodata(&self) -> i16 {
        self.nodata
    }

    /// Row-major values of one band
    pub fn band_data(&self, band: Band) -> Option<&[i16]> {
        self.bands.iter()
            .position(|b| *b == band)
            .map(|i| self.data[i].as_slice())
    }

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.grid.width as usize + col as usize
    }

    /// Value of band `band_index` at a pixel
    pub fn value(&self, band_index: usize, col: u32, row: u32) -> i16 {
        self.data[band_index][self.index(col, row)]
    }

    /// All band values at a pixel, in band order
    pub fn pixel(&self, col: u32, row: u32) -> Vec<i16> {
        let idx = self.index(col, row);
        self.data.iter().map(|band| band[idx]).collect()
    }

    pub fn is_covered(&self, col: u32, row: u32) -> bool {
        let idx = self.index(col, row);
        self.data.iter().any(|band| band[idx] != self.nodata)
    }

    pub fn covered_pixel_count(&self) -> u64 {
        (0..self.grid.height)
            .flat_map(|row| (0..self.grid.width).map(move |col| (col, row)))
            .filter(|(col, row)| self.is_covered(*col, *row))
            .count() as u64
    }

    /// Copy every covered pixel of `top` onto this raster
    ///
    /// `top` must share this raster's lattice and band list. Pixels of
    /// `top` outside this grid are ignored. Returns the number of pixels
    /// written.
    pub fn overlay(&mut self, top: &MultiBandRaster) -> GrabResult<u64> {
        self.grid.check_same_lattice(&top.grid)?;
        if self.bands != top.bands {
            return Err(GrabError::GridMismatch(format!(
                "Band lists differ: {:?} vs {:?}", self.bands, top.bands)));
        }

        let (col_offset, row_offset) = self.grid.offset_of(&top.grid)?;
        let mut written = 0;

        for row in 0..top.grid.height {
            let dest_row = row as i64 + row_offset;
            if dest_row < 0 || dest_row >= self.grid.height as i64 {
                continue;
            }

            for col in 0..top.grid.width {
                let dest_col = col as i64 + col_offset;
                if dest_col < 0 || dest_col >= self.grid.width as i64 {
                    continue;
                }

                if !top.is_covered(col, row) {
                    continue;
                }

                let src = top.index(col, row);
                let dest = self.index(dest_col as u32, dest_row as u32);
                for (dest_band, src_band) in self.data.iter_mut().zip(&top.data) {
                    dest_band[dest] = src_band[src];
                }
                written += 1;
            }
        }

        debug!("Overlay wrote {} of {} pixels", written, top.grid.pixel_count());
        Ok(written)
    }

    /// Copy of a pixel window
    pub fn crop(&self, region: &Region) -> GrabResult<MultiBandRaster> {
        if region.end_x() > self.grid.width || region.end_y() > self.grid.height {
            return Err(GrabError::GenericError(format!(
                "Window {:?} exceeds {}x{} grid", region, self.grid.width, self.grid.height)));
        }

        let mut data = Vec::with_capacity(self.data.len());
        for band in &self.data {
            let mut out = Vec::with_capacity(region.pixel_count() as usize);
            for row in region.y..region.end_y() {
                let start = self.index(region.x, row);
                out.extend_from_slice(&band[start..start + region.width as usize]);
            }
            data.push(out);
        }

        Ok(MultiBandRaster {
            grid: self.grid.sub_grid(region),
            bands: self.bands.clone(),
            data,
            nodata: self.nodata,
        })
    }

    /// Set pixels whose centre fails `keep` back to no-data
    ///
    /// Returns the number of covered pixels that were masked.
    pub fn mask_where<F>(&mut self, keep: F) -> u64
    where
        F: Fn(&Point) -> bool,
    {
        let mut masked = 0;
        for row in 0..self.grid.height {
            for col in 0..self.grid.width {
                if keep(&self.grid.pixel_center(col, row)) {
                    continue;
                }

                if self.is_covered(col, row) {
                    masked += 1;
                }
                let idx = self.index(col, row);
                for band in self.data.iter_mut() {
                    band[idx] = self.nodata;
                }
            }
        }
        masked
    }
}
