//! RAW metadata extractor
//!
//! Reads the EXIF block out of the RAW file (CR2 and NEF are TIFF
//! containers, so the exif reader walks their IFDs directly) and maps the
//! tags of interest onto a fixed struct of optional fields.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Exif, In, Tag, Value};
use log::{debug, info};

use crate::errors::{ConvertError, ConvertResult};

/// Capture metadata pulled from a RAW file
///
/// Fields the source file does not carry stay `None` and are later left
/// out of the FITS header entirely.
#[derive(Debug, Default, Clone)]
pub struct RawMetadata {
    /// Capture timestamp, normalized to `YYYY-MM-DD HH:MM:SS`
    pub timestamp: Option<String>,
    /// Exposure time in seconds
    pub exposure: Option<f32>,
    /// Aperture as the f-number denominator (f/N)
    pub aperture: Option<f32>,
    /// ISO sensitivity
    pub iso: Option<u32>,
    /// Focal length in millimeters
    pub focal_length: Option<f32>,
    /// Camera model string
    pub camera: Option<String>,
}

impl RawMetadata {
    /// Renders present fields as name/value pairs for display
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(ts) = &self.timestamp {
            fields.push(("Timestamp", ts.clone()));
        }
        if let Some(exp) = self.exposure {
            fields.push(("Exposure", format!("{} sec", exp)));
        }
        if let Some(ap) = self.aperture {
            fields.push(("Aperture", format!("f/{}", ap)));
        }
        if let Some(iso) = self.iso {
            fields.push(("ISO", iso.to_string()));
        }
        if let Some(focal) = self.focal_length {
            fields.push(("Focal length", format!("{} mm", focal)));
        }
        if let Some(camera) = &self.camera {
            fields.push(("Camera", camera.clone()));
        }
        fields
    }
}

/// Reads capture metadata from a RAW file
///
/// A file that cannot be opened or whose container cannot be parsed at all
/// is a `MetadataUnavailable` error. A file whose EXIF block lacks
/// individual tags is fine; those fields just come back `None`.
pub fn read_metadata(path: &Path) -> ConvertResult<RawMetadata> {
    info!("Reading metadata from {}", path.display());

    let file = File::open(path)
        .map_err(|e| ConvertError::MetadataUnavailable(format!("{}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| ConvertError::MetadataUnavailable(format!("{}: {}", path.display(), e)))?;

    let metadata = RawMetadata {
        iso: uint_field(&exif, Tag::PhotographicSensitivity),
        exposure: rational_field(&exif, Tag::ExposureTime),
        aperture: rational_field(&exif, Tag::FNumber),
        focal_length: rational_field(&exif, Tag::FocalLength),
        camera: ascii_field(&exif, Tag::Model),
        timestamp: ascii_field(&exif, Tag::DateTimeOriginal)
            .map(|raw| normalize_timestamp(&raw)),
    };

    if metadata.display_fields().is_empty() {
        debug!("{} carries no recognized capture tags", path.display());
    }

    Ok(metadata)
}

/// First value of an unsigned integer tag
fn uint_field(exif: &Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// First value of a rational tag, as f32
fn rational_field(exif: &Exif, tag: Tag) -> Option<f32> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|field| match field.value {
            Value::Rational(ref values) => values.first().map(|r| r.to_f64() as f32),
            _ => None,
        })
}

/// First value of an ASCII tag, trimmed of padding
fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|field| match field.value {
            Value::Ascii(ref values) => values
                .first()
                .and_then(|bytes| std::str::from_utf8(bytes).ok())
                .map(|s| s.trim_end_matches('\0').trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}

/// Normalizes an EXIF timestamp to `YYYY-MM-DD HH:MM:SS`
///
/// EXIF writes the date part with colons (`2024:06:01 21:03:54`); only the
/// first two colons are date separators.
fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut colons = 0;
    for c in trimmed.chars() {
        if c == ':' && colons < 2 {
            out.push('-');
            colons += 1;
        } else {
            out.push(c);
        }
    }
    out
}
