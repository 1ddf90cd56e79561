pub mod errors;
pub mod utils;
pub mod decoder;
pub mod pnm;
pub mod metadata;
pub mod channel;
pub mod fits;
pub mod converter;
pub mod commands;
pub mod api;

pub use crate::api::RawFits;

pub use channel::ChannelSelection;
pub use converter::RawConverter;
pub use decoder::{DcrawDecoder, DecodeMode, Decoder};
pub use errors::{ConvertError, ConvertResult};
pub use metadata::RawMetadata;
pub use pnm::{PnmFormat, PnmImage};
