//! EXIF metadata extraction module
//!
//! Reads capture metadata straight from the RAW file through the
//! kamadak-exif library. Every field is optional: cameras routinely omit
//! tags, and a missing tag must surface as an absent FITS header key,
//! never as zero.

pub mod extractor;

pub use extractor::{read_metadata, RawMetadata};
