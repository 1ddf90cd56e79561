//! Metadata inspection command
//!
//! Prints the capture metadata of a RAW file without converting any
//! pixels. Handy for checking what would end up in the FITS header.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::errors::{ConvertError, ConvertResult};
use crate::metadata;
use crate::utils::logger::Logger;

/// Command for printing RAW file metadata
pub struct InfoCommand<'a> {
    /// Path to the input RAW file
    input_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new InfoCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ConvertResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| ConvertError::GenericError("Missing input file".to_string()))?
            .clone();

        Ok(InfoCommand { input_file, logger })
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> ConvertResult<()> {
        info!("Reading metadata for {}", self.input_file);

        let metadata = metadata::read_metadata(Path::new(&self.input_file))?;
        let fields = metadata.display_fields();

        if fields.is_empty() {
            println!("{}: no capture metadata found", self.input_file);
            return Ok(());
        }

        println!("{}:", self.input_file);
        for (name, value) in &fields {
            println!("  {}: {}", name, value);
        }
        self.logger.print_metadata_fields(fields)?;

        Ok(())
    }
}
