//! PNM intermediate image parsing module
//!
//! The external decoder hands its result over as a binary PNM image:
//! P6 (three-channel pixmap) in demosaiced mode, P5 (single-plane graymap)
//! in raw mode. This module parses that buffer into an ndarray pixel cube.

pub mod parser;

#[cfg(test)]
mod tests;

pub use parser::{PnmFormat, PnmImage};
