//! RAW conversion command
//!
//! This module implements the default CLI command: convert one channel of
//! a RAW file into a FITS image.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::channel::ChannelSelection;
use crate::commands::command_traits::Command;
use crate::converter::RawConverter;
use crate::decoder::DcrawDecoder;
use crate::errors::{ConvertError, ConvertResult};
use crate::utils::logger::Logger;

/// Command for converting a RAW file to FITS
pub struct ConvertCommand<'a> {
    /// Path to the input RAW file
    input_file: String,
    /// Requested channel
    selection: ChannelSelection,
    /// Decoder executable name or path
    decoder_executable: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ConvertCommand<'a> {
    /// Create a new convert command
    ///
    /// The channel index is validated here, before any decoder work, so a
    /// bad index never spawns a subprocess.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ConvertCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ConvertResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| ConvertError::GenericError("Missing input file".to_string()))?
            .clone();

        let channel_str = args.get_one::<String>("channel")
            .ok_or_else(|| ConvertError::GenericError("Missing channel index".to_string()))?;
        let channel_index = channel_str.parse::<u8>()
            .map_err(|_| ConvertError::GenericError(format!("Invalid channel index: {}", channel_str)))?;
        let selection = ChannelSelection::from_index(channel_index)?;
        info!("Channel selection: {}", selection.name());

        let decoder_executable = args.get_one::<String>("decoder")
            .cloned()
            .unwrap_or_else(|| crate::decoder::dcraw::DEFAULT_EXECUTABLE.to_string());

        Ok(ConvertCommand {
            input_file,
            selection,
            decoder_executable,
            logger,
        })
    }
}

impl<'a> Command for ConvertCommand<'a> {
    fn execute(&self) -> ConvertResult<()> {
        info!("Converting file {}", self.input_file);

        let decoder = DcrawDecoder::with_executable(&self.decoder_executable);
        let converter = RawConverter::new(&decoder, self.logger);

        let written = converter.convert(Path::new(&self.input_file), self.selection)?;
        println!("Wrote {}", written.display());

        Ok(())
    }
}
