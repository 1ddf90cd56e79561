//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities. Pipeline
//! stages log through the log crate macros; the logger mirrors everything
//! to a log file next to the process and echoes to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level that gets recorded
    max_level: Level,
}

impl Logger {
    /// Creates a new logger instance recording up to `Level::Info`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        Logger::with_level(log_file, Level::Info)
    }

    /// Creates a new logger instance with an explicit verbosity cap
    pub fn with_level(log_file: &str, max_level: Level) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            max_level,
        })
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        if let Some(file) = &mut *self.file.lock().unwrap() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs extracted metadata fields in a formatted way
    ///
    /// # Arguments
    ///
    /// * `fields` - Field name / rendered value pairs
    pub fn print_metadata_fields(&self, fields: Vec<(&str, String)>) -> io::Result<()> {
        self.log("Extracted metadata:")?;

        for (name, value) in fields {
            let message = format!("  {}: {}", name, value);
            self.log(&message)?;
        }

        Ok(())
    }

    /// Static method to initialize the global logger
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file for the global logger
    /// * `verbose` - Whether debug-level messages should be recorded
    pub fn init_global_logger(log_file: &str, verbose: bool) -> io::Result<()> {
        let level = if verbose { Level::Debug } else { Level::Info };
        let global_logger = Logger::with_level(log_file, level)?;

        // Set up the global logger - we'll ignore the SetLoggerError
        // since we only call this once at startup
        if let Err(_) = log::set_boxed_logger(Box::new(global_logger)) {
            // Logger was already set - this should not happen in normal usage
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            // Also print to console
            println!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
