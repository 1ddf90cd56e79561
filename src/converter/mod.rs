//! RAW to FITS conversion pipeline
//!
//! One linear pass per input file: decode, parse the intermediate image,
//! read metadata, slice the requested plane, assemble the HDU, and write
//! it at a collision-free destination. Any stage error aborts the run;
//! nothing is written on failure.

use std::path::{Path, PathBuf};

use log::info;
use ndarray::{Array2, Axis};

use crate::channel::{self, ChannelSelection};
use crate::decoder::{DecodeMode, Decoder};
use crate::errors::{ConvertError, ConvertResult};
use crate::fits::{assemble_hdu, FitsWriter};
use crate::metadata::{self, RawMetadata};
use crate::pnm::{PnmFormat, PnmImage};
use crate::utils::logger::Logger;

/// Converter driving the whole pipeline
///
/// Borrows the decoder seam so callers (and tests) decide how decoding
/// actually happens.
pub struct RawConverter<'a> {
    decoder: &'a dyn Decoder,
    logger: &'a Logger,
    writer: FitsWriter,
}

impl<'a> RawConverter<'a> {
    /// Create a new converter
    pub fn new(decoder: &'a dyn Decoder, logger: &'a Logger) -> Self {
        RawConverter {
            decoder,
            logger,
            writer: FitsWriter::new(),
        }
    }

    /// Converts one RAW file into one FITS file
    ///
    /// # Arguments
    /// * `input` - Path to the RAW file
    /// * `selection` - Channel to extract
    ///
    /// # Returns
    /// The path of the written FITS file
    pub fn convert(&self, input: &Path, selection: ChannelSelection) -> ConvertResult<PathBuf> {
        info!(
            "Converting {} ({} channel)",
            input.display(),
            selection.name()
        );

        let plane = self.decode_plane(input, selection)?;

        info!("Reading capture metadata");
        let metadata = metadata::read_metadata(input)?;
        let _ = self.logger.print_metadata_fields(metadata.display_fields());

        let origin = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hdu = assemble_hdu(&plane, &metadata, selection.name(), &origin);

        let destination = self.writer.destination(input, selection);
        self.writer.write(&destination, hdu)?;

        info!("Conversion successful: {}", destination.display());
        self.logger
            .log(&format!("Wrote {}", destination.display()))?;
        Ok(destination)
    }

    /// Extracts capture metadata without converting pixels
    pub fn metadata(&self, input: &Path) -> ConvertResult<RawMetadata> {
        metadata::read_metadata(input)
    }

    /// Runs the decoder and slices the requested plane
    ///
    /// R/G/B go through the demosaiced three-channel image; Unscaled asks
    /// the decoder for the raw sensor grid and takes it whole, so its
    /// geometry follows the decoder's raw-mode convention.
    fn decode_plane(
        &self,
        input: &Path,
        selection: ChannelSelection,
    ) -> ConvertResult<Array2<u16>> {
        let mode = match selection {
            ChannelSelection::Unscaled => DecodeMode::Raw,
            _ => DecodeMode::Demosaiced,
        };

        info!("Decoding {} in {} mode", input.display(), mode.name());
        let buffer = self.decoder.decode(input, mode)?;
        if buffer.is_empty() {
            return Err(ConvertError::DecodeFailure(format!(
                "Decoder produced no output for {}",
                input.display()
            )));
        }

        info!("Parsing {} byte(s) of decoder output", buffer.len());
        let image = PnmImage::parse(&buffer)?;
        info!(
            "Intermediate image: {} {}x{}, maxval {}",
            image.format.name(),
            image.width,
            image.height,
            image.maxval
        );

        match mode {
            DecodeMode::Demosaiced => {
                if image.format != PnmFormat::Pixmap {
                    return Err(ConvertError::MalformedIntermediateFormat(format!(
                        "Expected three-channel P6 output, decoder produced {}",
                        image.format.name()
                    )));
                }
                channel::select_plane(&image.data, selection)
            }
            DecodeMode::Raw => {
                if image.format != PnmFormat::Graymap {
                    return Err(ConvertError::MalformedIntermediateFormat(format!(
                        "Expected single-plane P5 output, decoder produced {}",
                        image.format.name()
                    )));
                }
                Ok(image.data.index_axis(Axis(2), 0).to_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decoder fake handing back a fixed buffer
    struct FixedDecoder {
        buffer: Vec<u8>,
    }

    impl Decoder for FixedDecoder {
        fn decode(&self, _path: &Path, _mode: DecodeMode) -> ConvertResult<Vec<u8>> {
            Ok(self.buffer.clone())
        }
    }

    fn logger(dir: &tempfile::TempDir) -> Logger {
        Logger::new(dir.path().join("test.log").to_str().unwrap()).unwrap()
    }

    fn ppm_2x3() -> Vec<u8> {
        // 2 wide, 3 tall, 8-bit, pixel value = channel index
        let mut buffer = b"P6\n2 3\n255\n".to_vec();
        for _ in 0..6 {
            buffer.extend_from_slice(&[0, 1, 2]);
        }
        buffer
    }

    #[test]
    fn test_plane_matches_intermediate_extent() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        let decoder = FixedDecoder { buffer: ppm_2x3() };
        let converter = RawConverter::new(&decoder, &logger);

        let plane = converter
            .decode_plane(Path::new("img.cr2"), ChannelSelection::Green)
            .unwrap();
        assert_eq!(plane.shape(), &[3, 2]);
        assert!(plane.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_raw_mode_takes_graymap_whole() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        let mut buffer = b"P5\n4 2\n255\n".to_vec();
        buffer.extend_from_slice(&[9; 8]);
        let decoder = FixedDecoder { buffer };
        let converter = RawConverter::new(&decoder, &logger);

        let plane = converter
            .decode_plane(Path::new("img.cr2"), ChannelSelection::Unscaled)
            .unwrap();
        assert_eq!(plane.shape(), &[2, 4]);
    }

    #[test]
    fn test_graymap_rejected_in_demosaiced_mode() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        let mut buffer = b"P5\n1 1\n255\n".to_vec();
        buffer.push(0);
        let decoder = FixedDecoder { buffer };
        let converter = RawConverter::new(&decoder, &logger);

        let err = converter
            .decode_plane(Path::new("img.cr2"), ChannelSelection::Red)
            .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
    }

    #[test]
    fn test_empty_decoder_output_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir);
        let decoder = FixedDecoder { buffer: Vec::new() };
        let converter = RawConverter::new(&decoder, &logger);

        let err = converter
            .decode_plane(Path::new("img.cr2"), ChannelSelection::Red)
            .unwrap_err();
        assert!(matches!(err, ConvertError::DecodeFailure(_)));
    }
}
