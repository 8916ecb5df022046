//! Shared builders for the integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use scenegrab::catalog::{InMemoryPixels, SceneRecord};
use scenegrab::geometry::CoordinateSystem;
use scenegrab::raster::{Band, GridSpec, MultiBandRaster};

/// Pixel size shared by every test grid, in degrees
pub const PIXEL: f64 = 0.5;

/// Grid on the common test lattice
pub fn grid(origin_x: f64, origin_y: f64, width: u32, height: u32) -> GridSpec {
    GridSpec::new(origin_x, origin_y, PIXEL, PIXEL, width, height, CoordinateSystem::WGS84).unwrap()
}

/// Grid covering the box (10, 20, 12, 24): 4 columns by 8 rows
pub fn region_grid() -> GridSpec {
    grid(10.0, 24.0, 4, 8)
}

/// Midnight UTC of a calendar date
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Raster where band `i` of a covered pixel holds `value + i`
pub fn raster_with<F>(grid: GridSpec, value: i16, covered: F) -> MultiBandRaster
where
    F: Fn(u32, u32) -> bool,
{
    let pixel_count = grid.pixel_count() as usize;
    let data = (0..Band::EXPORT_SET.len())
        .map(|i| {
            let mut band = Vec::with_capacity(pixel_count);
            for row in 0..grid.height {
                for col in 0..grid.width {
                    band.push(if covered(col, row) { value + i as i16 } else { 0 });
                }
            }
            band
        })
        .collect();

    MultiBandRaster::from_bands(grid, Band::EXPORT_SET.to_vec(), data, 0).unwrap()
}

/// Scene covering its whole footprint with `value`
pub fn scene(id: &str, tile: &str, acquired: DateTime<Utc>, cloud: f64, footprint: GridSpec, value: i16) -> SceneRecord {
    partial_scene(id, tile, acquired, cloud, footprint, value, |_, _| true)
}

/// Scene covering only the pixels selected by `covered`
pub fn partial_scene<F>(id: &str, tile: &str, acquired: DateTime<Utc>, cloud: f64,
                        footprint: GridSpec, value: i16, covered: F) -> SceneRecord
where
    F: Fn(u32, u32) -> bool,
{
    let pixels = Arc::new(InMemoryPixels::new(raster_with(footprint, value, covered)));
    SceneRecord::new(id, tile, acquired, cloud, footprint, pixels).unwrap()
}

/// Fresh scratch directory for one test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scenegrab_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
