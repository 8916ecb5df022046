//! Tests for the GeoTIFF writer

use std::io::Cursor;

use super::test_utils::{read_f64s, read_ifd, read_u16s, small_raster};
use crate::compression::CompressionKind;
use crate::geometry::CoordinateSystem;
use crate::geotiff::constants::{field_types, tags};
use crate::geotiff::{align_to_4_bytes, geo_key_directory, rows_per_strip, GdalMetadata, GeoTiffWriter};

fn write_to_bytes(compression: CompressionKind, fill_value: i16, metadata: &GdalMetadata) -> Vec<u8> {
    let raster = small_raster();
    let mut cursor = Cursor::new(Vec::new());
    let size = GeoTiffWriter::new(compression)
        .write(&mut cursor, &raster, fill_value, metadata)
        .unwrap();
    let bytes = cursor.into_inner();
    assert_eq!(size, bytes.len() as u64);
    bytes
}

#[test]
fn test_uncompressed_layout() {
    let bytes = write_to_bytes(CompressionKind::None, -9999, &GdalMetadata::new());
    let (ifd_offset, entries) = read_ifd(&bytes);

    assert_eq!(ifd_offset % 4, 0);
    assert_eq!(entries[&tags::IMAGE_WIDTH].value_offset, 3);
    assert_eq!(entries[&tags::IMAGE_LENGTH].value_offset, 2);
    assert_eq!(entries[&tags::SAMPLES_PER_PIXEL].value_offset & 0xFFFF, 4);
    assert_eq!(entries[&tags::COMPRESSION].value_offset & 0xFFFF, 1);
    assert_eq!(entries[&tags::SAMPLE_FORMAT].count, 4);
    assert_eq!(entries[&tags::EXTRA_SAMPLES].count, 3);
    assert!(!entries.contains_key(&tags::GDAL_METADATA));

    // Whole image fits one strip right after the header
    let offsets = &entries[&tags::STRIP_OFFSETS];
    assert_eq!(offsets.count, 1);
    assert_eq!(offsets.value_offset, 8);
    assert_eq!(entries[&tags::STRIP_BYTE_COUNTS].value_offset, 3 * 2 * 4 * 2);

    let samples: Vec<i16> = read_u16s(&bytes, 8, 24).into_iter().map(|v| v as i16).collect();
    assert_eq!(&samples[0..4], &[100, 101, 102, 103]);
    assert_eq!(&samples[4..8], &[200, 201, 202, 203]);
    // Uncovered pixel is written with the fill value
    assert_eq!(&samples[8..12], &[-9999, -9999, -9999, -9999]);
    assert_eq!(&samples[20..24], &[600, 601, 602, 603]);
}

#[test]
fn test_nodata_and_georeferencing_tags() {
    let bytes = write_to_bytes(CompressionKind::None, 0, &GdalMetadata::new());
    let (_, entries) = read_ifd(&bytes);

    // "0\0" fits inline
    let nodata = &entries[&tags::GDAL_NODATA];
    assert_eq!(nodata.field_type, field_types::ASCII);
    assert_eq!(nodata.count, 2);
    assert_eq!(nodata.value_offset & 0xFFFF, b'0' as u32);

    let scale = &entries[&tags::MODEL_PIXEL_SCALE_TAG];
    assert_eq!(read_f64s(&bytes, scale.value_offset, scale.count), vec![0.5, 0.5, 0.0]);

    let tiepoint = &entries[&tags::MODEL_TIEPOINT_TAG];
    assert_eq!(read_f64s(&bytes, tiepoint.value_offset, tiepoint.count),
               vec![0.0, 0.0, 0.0, 10.0, 24.0, 0.0]);

    let keys = &entries[&tags::GEO_KEY_DIRECTORY_TAG];
    assert_eq!(read_u16s(&bytes, keys.value_offset, keys.count),
               geo_key_directory(&CoordinateSystem::WGS84).unwrap());
}

#[test]
fn test_compressed_strips() {
    let deflate = write_to_bytes(CompressionKind::Deflate, 0, &GdalMetadata::new());
    let (_, entries) = read_ifd(&deflate);
    assert_eq!(entries[&tags::COMPRESSION].value_offset & 0xFFFF, 8);

    let zstd = write_to_bytes(CompressionKind::Zstd, 0, &GdalMetadata::new());
    let (_, entries) = read_ifd(&zstd);
    assert_eq!(entries[&tags::COMPRESSION].value_offset & 0xFFFF, 50000);
    assert!(entries[&tags::STRIP_BYTE_COUNTS].value_offset > 0);
}

#[test]
fn test_gdal_metadata_tag() {
    let mut metadata = GdalMetadata::new();
    metadata.add("COMPOSITE_KEY", "34HBH");
    metadata.add_band_description(0, "B4");

    let bytes = write_to_bytes(CompressionKind::None, 0, &metadata);
    let (_, entries) = read_ifd(&bytes);

    let entry = &entries[&tags::GDAL_METADATA];
    let start = entry.value_offset as usize;
    let text = std::str::from_utf8(&bytes[start..start + entry.count as usize - 1]).unwrap();

    assert!(text.starts_with("<GDALMetadata>"));
    assert!(text.contains(r#"<Item name="COMPOSITE_KEY">34HBH</Item>"#));
    assert!(text.contains(r#"<Item name="DESCRIPTION" sample="0" role="description">B4</Item>"#));
}

#[test]
fn test_geo_key_directory_for_projected_crs() {
    let directory = geo_key_directory(&CoordinateSystem::UTM(33, true)).unwrap();
    assert_eq!(directory, vec![1, 1, 0, 3, 1024, 0, 1, 1, 1025, 0, 1, 1, 3072, 0, 1, 32633]);

    assert!(geo_key_directory(&CoordinateSystem::Other(900913)).is_err());
}

#[test]
fn test_strip_sizing_and_alignment() {
    assert_eq!(rows_per_strip(3, 4, 2), 2);
    assert_eq!(rows_per_strip(10_000, 4, 500), 1);
    assert_eq!(rows_per_strip(256, 4, 10_000), 32);

    assert_eq!(align_to_4_bytes(8), 8);
    assert_eq!(align_to_4_bytes(9), 12);
    assert_eq!(align_to_4_bytes(11), 12);
}
