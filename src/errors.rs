//! Custom error types for scene selection and export

use std::fmt;
use std::io;

/// Errors raised while building or running an export
#[derive(Debug)]
pub enum GrabError {
    /// I/O error
    IoError(io::Error),
    /// Failure decoding or encoding a band image
    ImageError(image::ImageError),
    /// Invalid or missing configuration value
    ConfigError(String),
    /// Malformed scene manifest
    ManifestError(String),
    /// Scene record that cannot be used
    InvalidScene(String),
    /// Rasters that do not share a pixel lattice
    GridMismatch(String),
    /// Requested compression is not available
    UnsupportedCompression(String),
    /// Export would exceed the pixel cap
    TooManyPixels { requested: u64, limit: u64 },
    /// Export region holds no pixel centre of the composite grid
    EmptyRegion(String),
    /// Export job could not be prepared or started
    ExportError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for GrabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrabError::IoError(e) => write!(f, "I/O error: {}", e),
            GrabError::ImageError(e) => write!(f, "Image error: {}", e),
            GrabError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GrabError::ManifestError(msg) => write!(f, "Manifest error: {}", msg),
            GrabError::InvalidScene(msg) => write!(f, "Invalid scene: {}", msg),
            GrabError::GridMismatch(msg) => write!(f, "Grid mismatch: {}", msg),
            GrabError::UnsupportedCompression(name) => write!(f, "Unsupported compression: {}", name),
            GrabError::TooManyPixels { requested, limit } => {
                write!(f, "Export needs {} pixels, limit is {}", requested, limit)
            }
            GrabError::EmptyRegion(msg) => write!(f, "Empty export region: {}", msg),
            GrabError::ExportError(msg) => write!(f, "Export error: {}", msg),
            GrabError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for GrabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrabError::IoError(e) => Some(e),
            GrabError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GrabError {
    fn from(error: io::Error) -> Self {
        GrabError::IoError(error)
    }
}

impl From<image::ImageError> for GrabError {
    fn from(error: image::ImageError) -> Self {
        GrabError::ImageError(error)
    }
}

impl From<String> for GrabError {
    fn from(msg: String) -> Self {
        GrabError::GenericError(msg)
    }
}

/// Result type for scene grabbing operations
pub type GrabResult<T> = Result<T, GrabError>;
