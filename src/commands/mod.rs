//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod convert_command;
pub mod info_command;

pub use command_traits::{Command, CommandFactory};
pub use convert_command::ConvertCommand;
pub use info_command::InfoCommand;

use clap::ArgMatches;
use crate::errors::ConvertResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct RawfitsCommandFactory;

impl RawfitsCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RawfitsCommandFactory
    }
}

impl Default for RawfitsCommandFactory {
    fn default() -> Self {
        RawfitsCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for RawfitsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> ConvertResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("info") {
            Ok(Box::new(InfoCommand::new(args, logger)?))
        } else {
            // Default to conversion
            Ok(Box::new(ConvertCommand::new(args, logger)?))
        }
    }
}
