//! FITS file writer
//!
//! Owns the last pipeline stage: derive the destination path, make sure it
//! collides with nothing, and persist the assembled HDU. A failed write
//! must leave no partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use fitrs::{Fits, Hdu};
use log::info;

use crate::channel::ChannelSelection;
use crate::errors::{ConvertError, ConvertResult};
use crate::utils::path_utils;

/// Writer for assembled FITS output
pub struct FitsWriter;

impl FitsWriter {
    /// Create a new writer
    pub fn new() -> Self {
        FitsWriter
    }

    /// Computes the destination path for an input file and channel
    ///
    /// The channel suffix lands before the extension, the extension is
    /// replaced with `.fits`, and an existing file at the candidate path
    /// pushes the name to `_1`, `_2`, ... variants.
    pub fn destination(&self, input: &Path, selection: ChannelSelection) -> PathBuf {
        let candidate = path_utils::derive_output_path(input, selection.suffix());
        path_utils::unique_path(candidate)
    }

    /// Persists the HDU at the given path
    ///
    /// Any serialization or I/O error is a `WriteFailure`; a partial file
    /// left by a failed write is removed best-effort.
    pub fn write(&self, path: &Path, hdu: Hdu) -> ConvertResult<()> {
        info!("Writing FITS file {}", path.display());

        match Fits::create(path, hdu) {
            Ok(_) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(path);
                Err(ConvertError::WriteFailure(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }
}

impl Default for FitsWriter {
    fn default() -> Self {
        FitsWriter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    use crate::fits::assembler::assemble_hdu;
    use crate::metadata::RawMetadata;

    #[test]
    fn test_destination_uses_channel_suffix() {
        let writer = FitsWriter::new();
        let out = writer.destination(Path::new("shot.nef"), ChannelSelection::Blue);
        assert_eq!(out, PathBuf::from("shot_B.fits"));
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fits");
        let plane = Array2::<u16>::zeros((4, 4));
        let hdu = assemble_hdu(&plane, &RawMetadata::default(), "Red", "in.cr2");

        FitsWriter::new().write(&path, hdu).unwrap();
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_failure_reported() {
        let plane = Array2::<u16>::zeros((2, 2));
        let hdu = assemble_hdu(&plane, &RawMetadata::default(), "Red", "in.cr2");
        let err = FitsWriter::new()
            .write(Path::new("/no/such/dir/out.fits"), hdu)
            .unwrap_err();
        assert!(matches!(err, ConvertError::WriteFailure(_)));
    }
}
