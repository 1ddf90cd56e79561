//! Custom error types for the RAW to FITS pipeline

use std::fmt;
use std::io;

/// Conversion-specific error types
#[derive(Debug)]
pub enum ConvertError {
    /// I/O error
    IoError(io::Error),
    /// Channel index outside the accepted 0..=3 range
    InvalidChannelIndex(u8),
    /// External decoder failed (non-zero exit, missing binary, empty output)
    DecodeFailure(String),
    /// Decoder output is not a well-formed PNM image
    MalformedIntermediateFormat(String),
    /// The RAW file's metadata could not be read at all
    MetadataUnavailable(String),
    /// Writing the FITS output failed
    WriteFailure(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::IoError(e) => write!(f, "I/O error: {}", e),
            ConvertError::InvalidChannelIndex(idx) => {
                write!(f, "Invalid channel index: {} (expected 0=R, 1=G, 2=B, 3=raw)", idx)
            }
            ConvertError::DecodeFailure(msg) => write!(f, "Decoder failure: {}", msg),
            ConvertError::MalformedIntermediateFormat(msg) => {
                write!(f, "Malformed intermediate image: {}", msg)
            }
            ConvertError::MetadataUnavailable(msg) => {
                write!(f, "Metadata unavailable: {}", msg)
            }
            ConvertError::WriteFailure(msg) => write!(f, "Write failure: {}", msg),
            ConvertError::GenericError(msg) => write!(f, "Conversion error: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<io::Error> for ConvertError {
    fn from(error: io::Error) -> Self {
        ConvertError::IoError(error)
    }
}

impl From<String> for ConvertError {
    fn from(msg: String) -> Self {
        ConvertError::GenericError(msg)
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_stage() {
        let err = ConvertError::InvalidChannelIndex(5);
        assert!(err.to_string().contains("Invalid channel index: 5"));

        let err = ConvertError::DecodeFailure("dcraw exited with 1".to_string());
        assert!(err.to_string().contains("Decoder failure"));

        let err = ConvertError::MalformedIntermediateFormat("bad magic".to_string());
        assert!(err.to_string().contains("Malformed intermediate image"));
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: ConvertError = io_err.into();
        assert!(matches!(err, ConvertError::IoError(_)));
    }
}
