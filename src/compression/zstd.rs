//! Handler for ZSTD compression

use crate::errors::{GrabError, GrabResult};
use super::handler::CompressionHandler;
use log::{debug, warn};

/// ZSTD compression handler (GDAL compression code 50000)
pub struct ZstdHandler {
    /// Compression level (1-22, default 3)
    compression_level: i32,
}

impl ZstdHandler {
    /// Create a new ZSTD handler with default compression level
    pub fn new() -> Self {
        ZstdHandler {
            compression_level: 3
        }
    }
}

impl Default for ZstdHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionHandler for ZstdHandler {
    fn compress(&self, data: &[u8]) -> GrabResult<Vec<u8>> {
        debug!("ZSTD compressing {} bytes with level {}", data.len(), self.compression_level);

        zstd::encode_all(data, self.compression_level).map_err(|e| {
            warn!("ZSTD compression error: {}", e);
            GrabError::GenericError(format!("ZSTD compression error: {}", e))
        })
    }

    fn name(&self) -> &'static str {
        "ZSTD"
    }

    fn code(&self) -> u16 {
        50000
    }
}
