//! Binary PNM parser
//!
//! Parses the decoder's whole output buffer: a short ASCII header (magic,
//! width, height, maxval, with `#` comments allowed) followed by binary
//! sample data. Samples are 1 byte each if maxval fits in 8 bits, else
//! 2 bytes big-endian. The declared geometry must account for every
//! remaining byte, otherwise the buffer is rejected.

use byteorder::{BigEndian, ByteOrder};
use ndarray::Array3;

use crate::errors::{ConvertError, ConvertResult};

/// PNM format variants the decoder can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// P6 binary pixmap, three samples per pixel
    Pixmap,
    /// P5 binary graymap, one sample per pixel
    Graymap,
}

impl PnmFormat {
    /// Number of channels per pixel for this format
    pub fn channels(&self) -> usize {
        match self {
            PnmFormat::Pixmap => 3,
            PnmFormat::Graymap => 1,
        }
    }

    /// Returns a string representation of this format
    pub fn name(&self) -> &'static str {
        match self {
            PnmFormat::Pixmap => "P6",
            PnmFormat::Graymap => "P5",
        }
    }
}

/// Parsed decoder output
///
/// `data` is laid out rows x columns x channels; graymaps carry a single
/// channel along the last axis.
#[derive(Debug)]
pub struct PnmImage {
    /// Source format tag
    pub format: PnmFormat,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Declared maximum sample value
    pub maxval: u16,
    /// Sample cube, rows x columns x channels
    pub data: Array3<u16>,
}

impl PnmImage {
    /// Parses a complete PNM buffer
    ///
    /// # Arguments
    /// * `buffer` - The decoder's entire captured output
    ///
    /// # Returns
    /// The parsed image, or `MalformedIntermediateFormat` describing what
    /// was wrong with the buffer
    pub fn parse(buffer: &[u8]) -> ConvertResult<PnmImage> {
        let mut cursor = HeaderCursor::new(buffer);

        let format = match cursor.magic()? {
            b"P6" => PnmFormat::Pixmap,
            b"P5" => PnmFormat::Graymap,
            other => {
                return Err(ConvertError::MalformedIntermediateFormat(format!(
                    "Unexpected magic '{}'",
                    String::from_utf8_lossy(other)
                )))
            }
        };

        let width = cursor.integer("width")?;
        let height = cursor.integer("height")?;
        let maxval = cursor.integer("maxval")?;

        if maxval == 0 || maxval > 65535 {
            return Err(ConvertError::MalformedIntermediateFormat(format!(
                "Maxval {} out of range",
                maxval
            )));
        }
        let maxval = maxval as u16;

        // Exactly one whitespace byte separates the header from the body
        let body = cursor.body()?;

        let channels = format.channels();
        let bytes_per_sample = if maxval <= 255 { 1 } else { 2 };
        // Header fields are untrusted; the size product must not overflow
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .and_then(|v| v.checked_mul(bytes_per_sample))
            .ok_or_else(|| {
                ConvertError::MalformedIntermediateFormat(format!(
                    "Declared size {}x{} overflows",
                    width, height
                ))
            })?;
        if body.len() != expected {
            return Err(ConvertError::MalformedIntermediateFormat(format!(
                "Body is {} bytes, {}x{}x{} at {} byte(s)/sample requires {}",
                body.len(),
                width,
                height,
                channels,
                bytes_per_sample,
                expected
            )));
        }

        let samples: Vec<u16> = if bytes_per_sample == 2 {
            body.chunks_exact(2).map(BigEndian::read_u16).collect()
        } else {
            body.iter().map(|&b| u16::from(b)).collect()
        };

        let data = Array3::from_shape_vec((height, width, channels), samples)
            .map_err(|e| ConvertError::MalformedIntermediateFormat(e.to_string()))?;

        Ok(PnmImage {
            format,
            width,
            height,
            maxval,
            data,
        })
    }
}

/// Cursor over the ASCII header portion of a PNM buffer
struct HeaderCursor<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        HeaderCursor { buffer, pos: 0 }
    }

    /// Reads the two-byte magic tag
    fn magic(&mut self) -> ConvertResult<&'a [u8]> {
        if self.buffer.len() < 2 {
            return Err(ConvertError::MalformedIntermediateFormat(
                "Buffer too short for magic tag".to_string(),
            ));
        }
        let magic = &self.buffer[..2];
        self.pos = 2;
        Ok(magic)
    }

    /// Skips whitespace and `#` comment lines
    fn skip_filler(&mut self) {
        while self.pos < self.buffer.len() {
            let b = self.buffer[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                // Comment runs to end of line
                while self.pos < self.buffer.len() && self.buffer[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Reads one decimal header field
    fn integer(&mut self, field: &str) -> ConvertResult<usize> {
        self.skip_filler();
        let start = self.pos;
        while self.pos < self.buffer.len() && self.buffer[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ConvertError::MalformedIntermediateFormat(format!(
                "Missing or non-numeric {} field",
                field
            )));
        }
        let mut value: usize = 0;
        for &b in &self.buffer[start..self.pos] {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(usize::from(b - b'0')))
                .ok_or_else(|| {
                    ConvertError::MalformedIntermediateFormat(format!("{} field overflows", field))
                })?;
        }
        Ok(value)
    }

    /// Consumes the single whitespace byte after maxval, returns the body
    fn body(&mut self) -> ConvertResult<&'a [u8]> {
        if self.pos >= self.buffer.len() || !self.buffer[self.pos].is_ascii_whitespace() {
            return Err(ConvertError::MalformedIntermediateFormat(
                "Header not terminated by whitespace".to_string(),
            ));
        }
        self.pos += 1;
        Ok(&self.buffer[self.pos..])
    }
}
