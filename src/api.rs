use std::path::{Path, PathBuf};

use crate::channel::ChannelSelection;
use crate::converter::RawConverter;
use crate::decoder::{DcrawDecoder, Decoder};
use crate::errors::ConvertResult;
use crate::metadata::RawMetadata;
use crate::utils::logger::Logger;

/// Main interface to the rawfits library
pub struct RawFits {
    logger: Logger,
    decoder: DcrawDecoder,
}

impl RawFits {
    /// Create a new RawFits instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "rawfits.log"
    ///
    /// # Returns
    /// A RawFits instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> ConvertResult<Self> {
        let log_path = log_file.unwrap_or("rawfits.log");
        let logger = Logger::new(log_path)?;
        Ok(RawFits {
            logger,
            decoder: DcrawDecoder::new(),
        })
    }

    /// Use a specific decoder executable instead of `dcraw` from PATH
    pub fn with_decoder_executable(mut self, executable: &str) -> Self {
        self.decoder = DcrawDecoder::with_executable(executable);
        self
    }

    /// Convert one channel of a RAW file to a FITS file
    ///
    /// # Arguments
    /// * `input_path` - Path to the RAW file
    /// * `channel_index` - 0=Red, 1=Green, 2=Blue, 3=unscaled raw
    ///
    /// # Returns
    /// The path of the written FITS file
    pub fn convert(&self, input_path: &str, channel_index: u8) -> ConvertResult<PathBuf> {
        let selection = ChannelSelection::from_index(channel_index)?;
        let converter = RawConverter::new(&self.decoder, &self.logger);
        converter.convert(Path::new(input_path), selection)
    }

    /// Convert using a caller-supplied decoder implementation
    ///
    /// This is the seam for embedding rawfits with a decoder other than
    /// the dcraw subprocess (or a fake one in tests).
    pub fn convert_with_decoder(
        &self,
        decoder: &dyn Decoder,
        input_path: &str,
        channel_index: u8,
    ) -> ConvertResult<PathBuf> {
        let selection = ChannelSelection::from_index(channel_index)?;
        let converter = RawConverter::new(decoder, &self.logger);
        converter.convert(Path::new(input_path), selection)
    }

    /// Read the capture metadata of a RAW file
    ///
    /// # Arguments
    /// * `input_path` - Path to the RAW file
    ///
    /// # Returns
    /// The extracted metadata; fields the file lacks are `None`
    pub fn metadata(&self, input_path: &str) -> ConvertResult<RawMetadata> {
        let converter = RawConverter::new(&self.decoder, &self.logger);
        converter.metadata(Path::new(input_path))
    }
}
