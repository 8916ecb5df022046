//! GDAL metadata block
//!
//! GDAL reads dataset and per-band metadata from an XML document stored
//! in the `GDAL_METADATA` tag.

use std::fmt::Display;
use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::{GrabError, GrabResult};

#[derive(Debug, Clone, PartialEq)]
struct MetadataItem {
    name: String,
    sample: Option<usize>,
    role: Option<&'static str>,
    value: String,
}

/// Items of a `<GDALMetadata>` document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GdalMetadata {
    items: Vec<MetadataItem>,
}

fn xml_error<E: Display>(e: E) -> GrabError {
    GrabError::ExportError(format!("Failed to write GDAL metadata: {}", e))
}

impl GdalMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dataset-level item
    pub fn add(&mut self, name: &str, value: &str) {
        self.items.push(MetadataItem {
            name: name.to_string(),
            sample: None,
            role: None,
            value: value.to_string(),
        });
    }

    /// Set the description of band `sample` (0-based)
    pub fn add_band_description(&mut self, sample: usize, description: &str) {
        self.items.push(MetadataItem {
            name: "DESCRIPTION".to_string(),
            sample: Some(sample),
            role: Some("description"),
            value: description.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the XML document
    pub fn to_xml(&self) -> GrabResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Start(BytesStart::new("GDALMetadata"))).map_err(xml_error)?;

        for item in &self.items {
            let mut start = BytesStart::new("Item");
            start.push_attribute(("name", item.name.as_str()));

            let sample = item.sample.map(|s| s.to_string());
            if let Some(sample) = &sample {
                start.push_attribute(("sample", sample.as_str()));
            }
            if let Some(role) = item.role {
                start.push_attribute(("role", role));
            }

            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            writer.write_event(Event::Text(BytesText::new(&item.value))).map_err(xml_error)?;
            writer.write_event(Event::End(BytesEnd::new("Item"))).map_err(xml_error)?;
        }

        writer.write_event(Event::End(BytesEnd::new("GDALMetadata"))).map_err(xml_error)?;

        String::from_utf8(writer.into_inner().into_inner()).map_err(xml_error)
    }
}
