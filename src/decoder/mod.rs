//! External RAW decoder abstraction
//!
//! This module defines the narrow seam between the conversion pipeline and
//! the external decoder binary. The pipeline only ever sees the `Decoder`
//! trait, so tests can substitute an in-memory fake and never spawn a
//! process.

pub mod dcraw;

pub use dcraw::DcrawDecoder;

use std::path::Path;

use crate::errors::ConvertResult;

/// Output mode requested from the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Demosaiced three-channel output (PPM)
    Demosaiced,
    /// Unscaled single-plane sensor output, no interpolation (PGM)
    Raw,
}

impl DecodeMode {
    /// Returns a string representation of this mode
    pub fn name(&self) -> &'static str {
        match self {
            DecodeMode::Demosaiced => "demosaiced",
            DecodeMode::Raw => "raw",
        }
    }
}

/// Trait for RAW decoder strategies
///
/// Implementations produce the decoder's entire output as one in-memory
/// byte buffer. The call blocks until the decoder finishes.
pub trait Decoder {
    /// Decode the RAW file at `path` in the given mode
    ///
    /// # Returns
    /// The decoder's captured standard output, or a `DecodeFailure`
    fn decode(&self, path: &Path, mode: DecodeMode) -> ConvertResult<Vec<u8>>;
}
