//! Compression of exported GeoTIFF strips
//!
//! This module implements strategies for the lossless compression
//! methods an export can request.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::AdobeDeflateHandler;
pub use factory::{CompressionFactory, CompressionKind};
pub use zstd::ZstdHandler;
