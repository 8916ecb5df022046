//! Compression handler trait definition

use crate::errors::GrabResult;

/// Strategy trait for compressing GeoTIFF strips
pub trait CompressionHandler: Send + Sync {
    /// Compress the data
    fn compress(&self, data: &[u8]) -> GrabResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Get the TIFF compression code
    fn code(&self) -> u16;
}
