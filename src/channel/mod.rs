//! Color channel selection module
//!
//! Maps the CLI channel index onto a selection enum and slices the chosen
//! plane out of the decoded pixel cube. Slicing goes through ndarray's
//! axis indexing; no per-pixel loop.

use ndarray::{Array2, Array3, Axis};

use crate::errors::{ConvertError, ConvertResult};

/// Requested output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSelection {
    /// Red plane of the demosaiced image
    Red,
    /// Green plane of the demosaiced image
    Green,
    /// Blue plane of the demosaiced image
    Blue,
    /// Untouched sensor grid, straight from the decoder's raw mode
    Unscaled,
}

impl ChannelSelection {
    /// Maps a CLI channel index onto a selection
    ///
    /// Fails fast with `InvalidChannelIndex` for anything outside 0..=3,
    /// before any decoder work happens.
    pub fn from_index(index: u8) -> ConvertResult<Self> {
        match index {
            0 => Ok(ChannelSelection::Red),
            1 => Ok(ChannelSelection::Green),
            2 => Ok(ChannelSelection::Blue),
            3 => Ok(ChannelSelection::Unscaled),
            other => Err(ConvertError::InvalidChannelIndex(other)),
        }
    }

    /// Human-readable channel name, also used as the FITS FILTER value
    pub fn name(&self) -> &'static str {
        match self {
            ChannelSelection::Red => "Red",
            ChannelSelection::Green => "Green",
            ChannelSelection::Blue => "Blue",
            ChannelSelection::Unscaled => "Raw",
        }
    }

    /// Suffix inserted into the output filename
    pub fn suffix(&self) -> &'static str {
        match self {
            ChannelSelection::Red => "_R",
            ChannelSelection::Green => "_G",
            ChannelSelection::Blue => "_B",
            ChannelSelection::Unscaled => "_raw",
        }
    }

    /// Index of this channel along the pixel cube's channel axis
    ///
    /// `None` for Unscaled, which never goes through the demosaiced cube.
    pub fn plane_index(&self) -> Option<usize> {
        match self {
            ChannelSelection::Red => Some(0),
            ChannelSelection::Green => Some(1),
            ChannelSelection::Blue => Some(2),
            ChannelSelection::Unscaled => None,
        }
    }
}

/// Slices one channel plane out of a rows x cols x channels cube
///
/// The result keeps the cube's row/column extent; selection never resizes.
pub fn select_plane(data: &Array3<u16>, selection: ChannelSelection) -> ConvertResult<Array2<u16>> {
    let Some(plane) = selection.plane_index() else {
        return Err(ConvertError::GenericError(
            "Unscaled channel does not come from the demosaiced cube".to_string(),
        ));
    };

    let channels = data.len_of(Axis(2));
    if plane >= channels {
        return Err(ConvertError::MalformedIntermediateFormat(format!(
            "Decoder output has {} channel(s), cannot select plane {}",
            channels, plane
        )));
    }

    Ok(data.index_axis(Axis(2), plane).to_owned())
}
