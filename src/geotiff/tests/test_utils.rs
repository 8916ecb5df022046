use std::collections::HashMap;
use std::io::Cursor;
use byteorder::{LittleEndian, ReadBytesExt};

use crate::geometry::CoordinateSystem;
use crate::raster::{Band, GridSpec, MultiBandRaster};

/// Raw IFD entry as read back from a written file
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub field_type: u16,
    pub count: u32,
    pub value_offset: u32,
}

/// Parse the header and single IFD of a little-endian TIFF
pub fn read_ifd(bytes: &[u8]) -> (u32, HashMap<u16, RawEntry>) {
    let mut cursor = Cursor::new(bytes);
    assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 0x4949);
    assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 42);
    let ifd_offset = cursor.read_u32::<LittleEndian>().unwrap();

    cursor.set_position(ifd_offset as u64);
    let count = cursor.read_u16::<LittleEndian>().unwrap();

    let mut entries = HashMap::new();
    for _ in 0..count {
        let tag = cursor.read_u16::<LittleEndian>().unwrap();
        let field_type = cursor.read_u16::<LittleEndian>().unwrap();
        let count = cursor.read_u32::<LittleEndian>().unwrap();
        let value_offset = cursor.read_u32::<LittleEndian>().unwrap();
        entries.insert(tag, RawEntry { field_type, count, value_offset });
    }
    assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 0);

    (ifd_offset, entries)
}

/// Read `count` little-endian u16 values at `offset`
pub fn read_u16s(bytes: &[u8], offset: u32, count: u32) -> Vec<u16> {
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(offset as u64);
    (0..count).map(|_| cursor.read_u16::<LittleEndian>().unwrap()).collect()
}

/// Read `count` little-endian f64 values at `offset`
pub fn read_f64s(bytes: &[u8], offset: u32, count: u32) -> Vec<f64> {
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(offset as u64);
    (0..count).map(|_| cursor.read_f64::<LittleEndian>().unwrap()).collect()
}

/// 3x2 four-band raster with its top-right pixel uncovered
pub fn small_raster() -> MultiBandRaster {
    let grid = GridSpec::new(10.0, 24.0, 0.5, 0.5, 3, 2, CoordinateSystem::WGS84).unwrap();
    let red = vec![100, 200, 0, 400, 500, 600];
    let green = vec![101, 201, 0, 401, 501, 601];
    let blue = vec![102, 202, 0, 402, 502, 602];
    let nir = vec![103, 203, 0, 403, 503, 603];
    MultiBandRaster::from_bands(grid, Band::EXPORT_SET.to_vec(), vec![red, green, blue, nir], 0).unwrap()
}
