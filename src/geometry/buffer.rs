//! Buffering points into rectangles

use super::bbox::BoundingBox;
use super::crs::CoordinateSystem;
use super::point::Point;

/// Metres per degree of latitude
pub const METERS_PER_DEGREE: f64 = 111320.0;

/// Create a rectangular buffer of `radius_meters` around a point
///
/// For geographic coordinates the radius is converted to approximate
/// degrees, with the longitude extent widened by `1 / cos(lat)`. The
/// result is the bounding rectangle of the circular buffer.
pub fn buffer_point(center: &Point, radius_meters: f64, crs: &CoordinateSystem) -> BoundingBox {
    if crs.is_geographic() {
        let lat_buffer = radius_meters / METERS_PER_DEGREE;
        let lon_buffer = radius_meters / (METERS_PER_DEGREE * center.y.to_radians().cos());

        BoundingBox::new(
            center.x - lon_buffer,
            center.y - lat_buffer,
            center.x + lon_buffer,
            center.y + lat_buffer,
        )
    } else {
        BoundingBox::from_point_buffer(center, radius_meters)
    }
}

/// Approximate ground size of a pixel in metres
pub fn pixel_size_meters(pixel_size: f64, crs: &CoordinateSystem) -> f64 {
    if crs.is_geographic() {
        pixel_size * METERS_PER_DEGREE
    } else {
        pixel_size
    }
}
