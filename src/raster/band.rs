//! Spectral bands exported for validation

use std::fmt;

/// Sentinel-2 band kept in exports
///
/// The exported band order is red, green, blue, near-infrared so the
/// first three channels display as true colour in desktop GIS tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// B4, red
    Red,
    /// B3, green
    Green,
    /// B2, blue
    Blue,
    /// B8, near-infrared
    Nir,
}

impl Band {
    /// The fixed export band set, in output order
    pub const EXPORT_SET: [Band; 4] = [Band::Red, Band::Green, Band::Blue, Band::Nir];

    /// Catalog band name, e.g. "B4"
    pub fn name(&self) -> &'static str {
        match self {
            Band::Red => "B4",
            Band::Green => "B3",
            Band::Blue => "B2",
            Band::Nir => "B8",
        }
    }

    pub fn from_name(name: &str) -> Option<Band> {
        match name.trim().to_uppercase().as_str() {
            "B4" => Some(Band::Red),
            "B3" => Some(Band::Green),
            "B2" => Some(Band::Blue),
            "B8" => Some(Band::Nir),
            _ => None,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
