//! Coordinate Reference System handling

use std::fmt;

use crate::errors::{GrabError, GrabResult};

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as u32
                } else {
                    32700 + *zone as u32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Whether coordinates are longitude/latitude degrees
    pub fn is_geographic(&self) -> bool {
        matches!(self, CoordinateSystem::WGS84)
    }

    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> CoordinateSystem {
        match epsg {
            4326 => CoordinateSystem::WGS84,
            3857 => CoordinateSystem::WebMercator,
            32601..=32660 => CoordinateSystem::UTM((epsg - 32600) as u8, true),
            32701..=32760 => CoordinateSystem::UTM((epsg - 32700) as u8, false),
            _ => CoordinateSystem::Other(epsg),
        }
    }

    /// Parse a coordinate system from a string (e.g. "EPSG:4326" or "4326")
    pub fn from_string(crs_str: &str) -> GrabResult<CoordinateSystem> {
        let crs_str = crs_str.trim().to_uppercase();
        let code = crs_str.strip_prefix("EPSG:").unwrap_or(&crs_str);

        match code.parse::<u32>() {
            Ok(epsg) => Ok(Self::from_epsg(epsg)),
            Err(_) => Err(GrabError::ConfigError(format!("Unsupported CRS format: {}", crs_str))),
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg_code())
    }
}
