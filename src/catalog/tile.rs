//! MGRS tile identifiers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Zone number, latitude band (no I or O), 100 km square letters
    static ref TILE_PATTERN: Regex = Regex::new(r"^[0-9]{2}[C-HJ-NP-X][A-HJ-NP-Z]{2}$").unwrap();

    // Catalog index ending, e.g. "..._T34HBH"
    static ref INDEX_TILE_SUFFIX: Regex = Regex::new(r"_T([0-9]{2}[A-Z]{3})$").unwrap();
}

/// Whether `tile` looks like an MGRS tile id such as "34HBH"
pub fn is_valid_tile(tile: &str) -> bool {
    TILE_PATTERN.is_match(tile)
}

/// Extract the tile id from a Sentinel-2 catalog index
///
/// `20190603T084601_20190603T090101_T34HBH` gives `34HBH`.
pub fn tile_from_index(index: &str) -> Option<String> {
    INDEX_TILE_SUFFIX.captures(index)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|tile| is_valid_tile(tile))
}
