//! Handler for uncompressed data

use crate::errors::GrabResult;
use super::handler::CompressionHandler;

/// Uncompressed data handler (compression code 1)
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn compress(&self, data: &[u8]) -> GrabResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "Uncompressed"
    }

    fn code(&self) -> u16 {
        1
    }
}
