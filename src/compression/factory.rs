//! Factory for creating compression handlers

use std::fmt;

use crate::errors::{GrabError, GrabResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::AdobeDeflateHandler;
use super::zstd::ZstdHandler;

/// Lossless compression applied to exported strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionKind {
    None,
    Deflate,
    Zstd,
}

impl CompressionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CompressionKind::None => "none",
            CompressionKind::Deflate => "deflate",
            CompressionKind::Zstd => "zstd",
        }
    }
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create the handler for a compression kind
    pub fn create_handler(kind: CompressionKind) -> Box<dyn CompressionHandler> {
        match kind {
            CompressionKind::None => Box::new(UncompressedHandler),
            CompressionKind::Deflate => Box::new(AdobeDeflateHandler),
            CompressionKind::Zstd => Box::new(ZstdHandler::new()),
        }
    }

    /// Parse a compression kind by name
    pub fn kind_by_name(name: &str) -> GrabResult<CompressionKind> {
        match name.trim().to_lowercase().as_str() {
            "uncompressed" | "none" => Ok(CompressionKind::None),
            "deflate" | "zip" | "adobe deflate" => Ok(CompressionKind::Deflate),
            "zstd" => Ok(CompressionKind::Zstd),
            _ => Err(GrabError::UnsupportedCompression(name.to_string()))
        }
    }
}
