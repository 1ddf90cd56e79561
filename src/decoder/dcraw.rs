//! dcraw subprocess decoder
//!
//! Invokes the dcraw binary with mode-specific flags and captures its
//! standard output in memory. The call is synchronous; no timeout is
//! applied, so a hung decoder blocks the conversion (known limitation).

use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::decoder::{DecodeMode, Decoder};
use crate::errors::{ConvertError, ConvertResult};

/// Default decoder executable name, resolved through PATH
pub const DEFAULT_EXECUTABLE: &str = "dcraw";

/// Decoder backed by the dcraw command-line tool
pub struct DcrawDecoder {
    /// Executable name or path used to spawn the decoder
    executable: String,
}

impl DcrawDecoder {
    /// Creates a decoder using the default `dcraw` executable
    pub fn new() -> Self {
        DcrawDecoder {
            executable: DEFAULT_EXECUTABLE.to_string(),
        }
    }

    /// Creates a decoder using a specific executable name or path
    pub fn with_executable(executable: &str) -> Self {
        DcrawDecoder {
            executable: executable.to_string(),
        }
    }

    /// Flags for the given output mode
    ///
    /// Demosaiced: `-c -6 -j -W` — 16-bit PPM on stdout, no rotation,
    /// fixed white level. Raw: `-c -D -4 -j` — document mode, 16-bit
    /// linear PGM of the untouched sensor grid. Both modes pass `-j` so
    /// they agree on orientation for rotated shots.
    fn flags(mode: DecodeMode) -> &'static [&'static str] {
        match mode {
            DecodeMode::Demosaiced => &["-c", "-6", "-j", "-W"],
            DecodeMode::Raw => &["-c", "-D", "-4", "-j"],
        }
    }
}

impl Default for DcrawDecoder {
    fn default() -> Self {
        DcrawDecoder::new()
    }
}

impl Decoder for DcrawDecoder {
    fn decode(&self, path: &Path, mode: DecodeMode) -> ConvertResult<Vec<u8>> {
        let flags = DcrawDecoder::flags(mode);
        info!("Running {} {} {}", self.executable, flags.join(" "), path.display());

        let output = Command::new(&self.executable)
            .args(flags)
            .arg(path)
            .output()
            .map_err(|e| {
                ConvertError::DecodeFailure(format!(
                    "Failed to run '{}': {}. Is dcraw installed?",
                    self.executable, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::DecodeFailure(format!(
                "'{}' exited with {}: {}",
                self.executable,
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(ConvertError::DecodeFailure(format!(
                "'{}' produced no output for {}",
                self.executable,
                path.display()
            )));
        }

        debug!("Decoder produced {} bytes ({} mode)", output.stdout.len(), mode.name());
        Ok(output.stdout)
    }
}
