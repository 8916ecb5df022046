//! GeoTIFF format constants
//!
//! Tag numbers, field types and GeoKey ids used when writing exports.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// Size of the classic TIFF header
    pub const HEADER_SIZE: u64 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
}

/// Tags written to exported files
pub mod tags {
    pub const IMAGE_WIDTH: u16 = 256;
    pub const IMAGE_LENGTH: u16 = 257;
    pub const BITS_PER_SAMPLE: u16 = 258;
    pub const COMPRESSION: u16 = 259;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262;
    pub const STRIP_OFFSETS: u16 = 273;
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    pub const ROWS_PER_STRIP: u16 = 278;
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    pub const PLANAR_CONFIGURATION: u16 = 284;
    pub const SOFTWARE: u16 = 305;
    pub const EXTRA_SAMPLES: u16 = 338;
    pub const SAMPLE_FORMAT: u16 = 339;

    // GeoTIFF tags
    pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
    pub const MODEL_TIEPOINT_TAG: u16 = 33922;
    pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;

    // GDAL private tags
    pub const GDAL_METADATA: u16 = 42112;
    pub const GDAL_NODATA: u16 = 42113;
}

/// Tag values
pub mod values {
    pub const PHOTOMETRIC_MIN_IS_BLACK: u16 = 1;
    pub const PLANAR_CONTIGUOUS: u16 = 1;
    pub const SAMPLE_FORMAT_INT: u16 = 2;
    pub const EXTRA_SAMPLE_UNSPECIFIED: u16 = 0;
}

/// GeoKey ids and values
pub mod geo_keys {
    pub const GT_MODEL_TYPE: u16 = 1024;
    pub const GT_RASTER_TYPE: u16 = 1025;
    pub const GEOGRAPHIC_TYPE: u16 = 2048;
    pub const PROJECTED_CS_TYPE: u16 = 3072;

    pub const MODEL_TYPE_PROJECTED: u16 = 1;
    pub const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
    pub const RASTER_PIXEL_IS_AREA: u16 = 1;
}
