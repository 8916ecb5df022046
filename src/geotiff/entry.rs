//! IFD entries with typed values

use byteorder::{LittleEndian, WriteBytesExt};

use super::constants::field_types;
use crate::errors::GrabResult;

/// Values carried by a tag
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Short(Vec<u16>),
    Long(Vec<u32>),
    Double(Vec<f64>),
    /// Stored NUL-terminated
    Ascii(String),
}

impl TagValue {
    pub fn field_type(&self) -> u16 {
        match self {
            TagValue::Short(_) => field_types::SHORT,
            TagValue::Long(_) => field_types::LONG,
            TagValue::Double(_) => field_types::DOUBLE,
            TagValue::Ascii(_) => field_types::ASCII,
        }
    }

    /// Number of values, as written in the entry's count field
    pub fn count(&self) -> u32 {
        match self {
            TagValue::Short(v) => v.len() as u32,
            TagValue::Long(v) => v.len() as u32,
            TagValue::Double(v) => v.len() as u32,
            TagValue::Ascii(s) => s.len() as u32 + 1,
        }
    }

    /// Little-endian encoding of the values
    pub fn to_bytes(&self) -> GrabResult<Vec<u8>> {
        let mut bytes = Vec::new();
        match self {
            TagValue::Short(values) => {
                for v in values {
                    bytes.write_u16::<LittleEndian>(*v)?;
                }
            }
            TagValue::Long(values) => {
                for v in values {
                    bytes.write_u32::<LittleEndian>(*v)?;
                }
            }
            TagValue::Double(values) => {
                for v in values {
                    bytes.write_f64::<LittleEndian>(*v)?;
                }
            }
            TagValue::Ascii(text) => {
                bytes.extend_from_slice(text.as_bytes());
                bytes.push(0);
            }
        }
        Ok(bytes)
    }
}

/// One tag of the image file directory
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub tag: u16,
    pub value: TagValue,
}

impl TagEntry {
    pub fn new(tag: u16, value: TagValue) -> Self {
        TagEntry { tag, value }
    }

    pub fn short(tag: u16, value: u16) -> Self {
        Self::new(tag, TagValue::Short(vec![value]))
    }

    pub fn long(tag: u16, value: u32) -> Self {
        Self::new(tag, TagValue::Long(vec![value]))
    }

    pub fn ascii(tag: u16, text: &str) -> Self {
        Self::new(tag, TagValue::Ascii(text.to_string()))
    }
}
