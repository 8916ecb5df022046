//! GeoTIFF writing
//!
//! Files are written as little-endian classic TIFF in one pass: header,
//! compressed strips, out-of-line tag data, then the IFD. The header's
//! first-IFD offset is patched once the IFD position is known. Every
//! block starts on a 4-byte boundary.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, info};

use super::constants::{geo_keys, header, tags, values};
use super::entry::{TagEntry, TagValue};
use super::metadata::GdalMetadata;
use crate::compression::{CompressionFactory, CompressionKind};
use crate::errors::{GrabError, GrabResult};
use crate::geometry::CoordinateSystem;
use crate::raster::MultiBandRaster;

/// Uncompressed bytes aimed for per strip
const TARGET_STRIP_BYTES: usize = 64 * 1024;

/// Writer for int16 multi-band GeoTIFFs
pub struct GeoTiffWriter {
    compression: CompressionKind,
    software: String,
}

/// Next 4-byte aligned position
pub fn align_to_4_bytes(offset: u64) -> u64 {
    (offset + 3) & !3
}

fn write_padding(writer: &mut impl Write, data_len: usize) -> GrabResult<u64> {
    let padding = align_to_4_bytes(data_len as u64) - data_len as u64;
    if padding > 0 {
        writer.write_all(&vec![0u8; padding as usize])?;
    }
    Ok(padding)
}

fn to_offset(offset: u64) -> GrabResult<u32> {
    u32::try_from(offset).map_err(|_| GrabError::ExportError(format!(
        "Offset {} exceeds the 4 GiB limit of classic TIFF", offset)))
}

/// Rows per strip for a given row width
pub fn rows_per_strip(width: u32, samples_per_pixel: u16, height: u32) -> u32 {
    let row_bytes = (width as usize * samples_per_pixel as usize * 2).max(1);
    ((TARGET_STRIP_BYTES / row_bytes).max(1) as u32).min(height.max(1))
}

/// GeoKey directory for a coordinate system
pub fn geo_key_directory(crs: &CoordinateSystem) -> GrabResult<Vec<u16>> {
    let epsg = u16::try_from(crs.epsg_code()).map_err(|_| GrabError::ExportError(format!(
        "{} cannot be stored in a GeoKey", crs)))?;

    let keys: [(u16, u16); 3] = if crs.is_geographic() {
        [
            (geo_keys::GT_MODEL_TYPE, geo_keys::MODEL_TYPE_GEOGRAPHIC),
            (geo_keys::GT_RASTER_TYPE, geo_keys::RASTER_PIXEL_IS_AREA),
            (geo_keys::GEOGRAPHIC_TYPE, epsg),
        ]
    } else {
        [
            (geo_keys::GT_MODEL_TYPE, geo_keys::MODEL_TYPE_PROJECTED),
            (geo_keys::GT_RASTER_TYPE, geo_keys::RASTER_PIXEL_IS_AREA),
            (geo_keys::PROJECTED_CS_TYPE, epsg),
        ]
    };

    // Header: version 1, revision 1.0, key count
    let mut directory = vec![1, 1, 0, keys.len() as u16];
    for (key, value) in keys {
        // Location 0: value stored inline
        directory.extend_from_slice(&[key, 0, 1, value]);
    }
    Ok(directory)
}

impl GeoTiffWriter {
    pub fn new(compression: CompressionKind) -> Self {
        GeoTiffWriter {
            compression,
            software: format!("scenegrab {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Write a raster to a file, returning the file size
    pub fn write_file(&self, path: &Path, raster: &MultiBandRaster,
                      fill_value: i16, metadata: &GdalMetadata) -> GrabResult<u64> {
        info!("Writing GeoTIFF to {}", path.display());

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);
        let size = self.write(&mut writer, raster, fill_value, metadata)?;
        writer.flush()?;

        Ok(size)
    }

    /// Write a raster to any seekable sink, returning the bytes written
    ///
    /// Pixels not covered by the raster are written as `fill_value`,
    /// which is also recorded as the GDAL no-data value.
    pub fn write<W: Write + Seek>(&self, writer: &mut W, raster: &MultiBandRaster,
                                  fill_value: i16, metadata: &GdalMetadata) -> GrabResult<u64> {
        let grid = raster.grid();
        if grid.width == 0 || grid.height == 0 || raster.bands().is_empty() {
            return Err(GrabError::ExportError("Cannot write an empty raster".to_string()));
        }

        let handler = CompressionFactory::create_handler(self.compression);
        let samples = raster.bands().len() as u16;
        let strip_rows = rows_per_strip(grid.width, samples, grid.height);

        Self::write_header(writer)?;
        let mut offset = header::HEADER_SIZE;

        let mut strip_offsets = Vec::new();
        let mut strip_counts = Vec::new();
        let mut row = 0;
        while row < grid.height {
            let rows = strip_rows.min(grid.height - row);
            let raw = Self::encode_rows(raster, row, rows, fill_value)?;
            let data = handler.compress(&raw)?;

            strip_offsets.push(to_offset(offset)?);
            strip_counts.push(data.len() as u32);

            writer.write_all(&data)?;
            offset += data.len() as u64 + write_padding(writer, data.len())?;
            row += rows;
        }
        debug!("Wrote {} strips of {} rows with {}", strip_offsets.len(), strip_rows, handler.name());

        let mut entries = vec![
            TagEntry::long(tags::IMAGE_WIDTH, grid.width),
            TagEntry::long(tags::IMAGE_LENGTH, grid.height),
            TagEntry::new(tags::BITS_PER_SAMPLE, TagValue::Short(vec![16; samples as usize])),
            TagEntry::short(tags::COMPRESSION, handler.code()),
            TagEntry::short(tags::PHOTOMETRIC_INTERPRETATION, values::PHOTOMETRIC_MIN_IS_BLACK),
            TagEntry::new(tags::STRIP_OFFSETS, TagValue::Long(strip_offsets)),
            TagEntry::short(tags::SAMPLES_PER_PIXEL, samples),
            TagEntry::long(tags::ROWS_PER_STRIP, strip_rows),
            TagEntry::new(tags::STRIP_BYTE_COUNTS, TagValue::Long(strip_counts)),
            TagEntry::short(tags::PLANAR_CONFIGURATION, values::PLANAR_CONTIGUOUS),
            TagEntry::ascii(tags::SOFTWARE, &self.software),
            TagEntry::new(tags::SAMPLE_FORMAT, TagValue::Short(vec![values::SAMPLE_FORMAT_INT; samples as usize])),
            TagEntry::new(tags::MODEL_PIXEL_SCALE_TAG,
                          TagValue::Double(vec![grid.pixel_width, grid.pixel_height, 0.0])),
            TagEntry::new(tags::MODEL_TIEPOINT_TAG,
                          TagValue::Double(vec![0.0, 0.0, 0.0, grid.origin_x, grid.origin_y, 0.0])),
            TagEntry::new(tags::GEO_KEY_DIRECTORY_TAG, TagValue::Short(geo_key_directory(&grid.crs)?)),
            TagEntry::ascii(tags::GDAL_NODATA, &fill_value.to_string()),
        ];

        if samples > 1 {
            entries.push(TagEntry::new(tags::EXTRA_SAMPLES,
                                       TagValue::Short(vec![values::EXTRA_SAMPLE_UNSPECIFIED; samples as usize - 1])));
        }
        if !metadata.is_empty() {
            entries.push(TagEntry::ascii(tags::GDAL_METADATA, &metadata.to_xml()?));
        }
        entries.sort_by_key(|entry| entry.tag);

        // Values longer than four bytes live outside the IFD
        let mut encoded = Vec::with_capacity(entries.len());
        for entry in &entries {
            let bytes = entry.value.to_bytes()?;
            if bytes.len() > 4 {
                let data_offset = to_offset(offset)?;
                writer.write_all(&bytes)?;
                offset += bytes.len() as u64 + write_padding(writer, bytes.len())?;
                encoded.push((entry, data_offset.to_le_bytes()));
            } else {
                let mut inline = [0u8; 4];
                inline[..bytes.len()].copy_from_slice(&bytes);
                encoded.push((entry, inline));
            }
        }

        let ifd_offset = offset;
        writer.write_u16::<LittleEndian>(encoded.len() as u16)?;
        for (entry, value) in &encoded {
            writer.write_u16::<LittleEndian>(entry.tag)?;
            writer.write_u16::<LittleEndian>(entry.value.field_type())?;
            writer.write_u32::<LittleEndian>(entry.value.count())?;
            writer.write_all(value)?;
        }
        // No further IFDs
        writer.write_u32::<LittleEndian>(0)?;
        let total = ifd_offset + 2 + 12 * encoded.len() as u64 + 4;

        writer.seek(SeekFrom::Start(4))?;
        writer.write_u32::<LittleEndian>(to_offset(ifd_offset)?)?;
        writer.seek(SeekFrom::Start(total))?;

        debug!("IFD with {} entries at offset {}, file size {}", encoded.len(), ifd_offset, total);
        Ok(total)
    }

    fn write_header(writer: &mut impl Write) -> GrabResult<()> {
        writer.write_all(&header::LITTLE_ENDIAN_MARKER)?;
        writer.write_u16::<LittleEndian>(header::TIFF_VERSION)?;
        // Placeholder for the first IFD offset
        writer.write_u32::<LittleEndian>(0)?;
        Ok(())
    }

    /// Pixel-interleaved little-endian samples of a run of rows
    fn encode_rows(raster: &MultiBandRaster, first_row: u32, rows: u32, fill_value: i16) -> GrabResult<Vec<u8>> {
        let width = raster.grid().width;
        let samples = raster.bands().len();
        let mut bytes = Vec::with_capacity(rows as usize * width as usize * samples * 2);

        for row in first_row..first_row + rows {
            for col in 0..width {
                let covered = raster.is_covered(col, row);
                for band in 0..samples {
                    let value = if covered { raster.value(band, col, row) } else { fill_value };
                    bytes.write_i16::<LittleEndian>(value)?;
                }
            }
        }

        Ok(bytes)
    }
}
