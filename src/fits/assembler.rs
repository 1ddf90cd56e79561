//! FITS HDU assembly
//!
//! Builds the primary HDU from a single-channel plane plus capture
//! metadata. Header keys follow the conventions astronomical consumers
//! expect: absent metadata writes no key at all, so readers can tell
//! "unknown" apart from zero.

use fitrs::Hdu;
use log::debug;
use ndarray::Array2;

use crate::metadata::RawMetadata;

/// Name recorded in the PROGRAM header key
const PROGRAM: &str = concat!("rawfits ", env!("CARGO_PKG_VERSION"));

/// Builds the primary HDU for a channel plane
///
/// The plane is stored as 32-bit integers (FITS has no unsigned 16-bit
/// layout here; widening is lossless). Axis order follows FITS convention:
/// NAXIS1 is the column count.
///
/// # Arguments
/// * `plane` - Selected channel plane, rows x columns
/// * `metadata` - Capture metadata; `None` fields are skipped
/// * `filter_name` - Channel name recorded under FILTER
/// * `origin` - Source file name recorded under ORIGIN
pub fn assemble_hdu(
    plane: &Array2<u16>,
    metadata: &RawMetadata,
    filter_name: &str,
    origin: &str,
) -> Hdu {
    let (rows, cols) = plane.dim();
    let samples: Vec<i32> = plane.iter().map(|&v| i32::from(v)).collect();

    // fitrs expects the fastest-varying axis first
    let mut hdu = Hdu::new(&[cols, rows], samples);

    if let Some(timestamp) = &metadata.timestamp {
        hdu.insert("OBSTIME", timestamp.as_str());
    }
    if let Some(exposure) = metadata.exposure {
        hdu.insert("EXPTIME", f64::from(exposure));
    }
    if let Some(aperture) = metadata.aperture {
        hdu.insert("APERTUR", f64::from(aperture));
    }
    if let Some(iso) = metadata.iso {
        hdu.insert("ISO", iso as i32);
    }
    if let Some(focal) = metadata.focal_length {
        hdu.insert("FOCAL", f64::from(focal));
    }
    if let Some(camera) = &metadata.camera {
        hdu.insert("CAMERA", camera.as_str());
    }
    hdu.insert("ORIGIN", origin);
    hdu.insert("FILTER", filter_name);
    hdu.insert("PROGRAM", PROGRAM);

    debug!(
        "Assembled {}x{} HDU, filter {}, {} metadata field(s)",
        cols,
        rows,
        filter_name,
        metadata.display_fields().len()
    );

    hdu
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitrs::HeaderValue;
    use ndarray::Array2;

    fn plane() -> Array2<u16> {
        Array2::from_shape_fn((2, 3), |(r, c)| (r * 3 + c) as u16)
    }

    #[test]
    fn test_present_fields_written() {
        let metadata = RawMetadata {
            timestamp: Some("2024-06-01 21:03:54".to_string()),
            exposure: Some(0.008),
            iso: Some(800),
            ..RawMetadata::default()
        };
        let hdu = assemble_hdu(&plane(), &metadata, "Green", "img.cr2");

        assert!(matches!(
            hdu.value("ISO"),
            Some(HeaderValue::IntegerNumber(800))
        ));
        assert!(hdu.value("EXPTIME").is_some());
        assert!(hdu.value("OBSTIME").is_some());
        assert!(hdu.value("FILTER").is_some());
    }

    #[test]
    fn test_absent_fields_omitted() {
        let hdu = assemble_hdu(&plane(), &RawMetadata::default(), "Red", "img.cr2");

        assert!(hdu.value("ISO").is_none());
        assert!(hdu.value("EXPTIME").is_none());
        assert!(hdu.value("APERTUR").is_none());
        assert!(hdu.value("FOCAL").is_none());
        assert!(hdu.value("CAMERA").is_none());
        assert!(hdu.value("OBSTIME").is_none());
        // Keys not sourced from metadata are always present
        assert!(hdu.value("ORIGIN").is_some());
        assert!(hdu.value("PROGRAM").is_some());
    }
}
