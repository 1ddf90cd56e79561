//! FITS output module
//!
//! Assembles the selected pixel plane and the extracted metadata into a
//! primary HDU and persists it at a collision-free destination path.

pub mod assembler;
pub mod writer;

pub use assembler::assemble_hdu;
pub use writer::FitsWriter;
