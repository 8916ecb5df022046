//! Handler for Adobe Deflate compression

use std::io::Write;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use crate::errors::GrabResult;
use super::handler::CompressionHandler;

/// Adobe Deflate (Zlib) compression handler (compression code 8)
pub struct AdobeDeflateHandler;

impl CompressionHandler for AdobeDeflateHandler {
    fn compress(&self, data: &[u8]) -> GrabResult<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn name(&self) -> &'static str {
        "Adobe Deflate"
    }

    fn code(&self) -> u16 {
        8
    }
}
