//! Tests for the PNM parser

use crate::errors::ConvertError;
use crate::pnm::{PnmFormat, PnmImage};

/// Builds a P6 buffer with 8-bit samples from a flat RGB byte list
fn ppm8(width: usize, height: usize, body: &[u8]) -> Vec<u8> {
    let mut buffer = format!("P6\n{} {}\n255\n", width, height).into_bytes();
    buffer.extend_from_slice(body);
    buffer
}

#[test]
fn test_parse_8bit_pixmap() {
    // 2x1 pixels: (1,2,3) and (4,5,6)
    let buffer = ppm8(2, 1, &[1, 2, 3, 4, 5, 6]);
    let image = PnmImage::parse(&buffer).unwrap();

    assert_eq!(image.format, PnmFormat::Pixmap);
    assert_eq!((image.width, image.height), (2, 1));
    assert_eq!(image.maxval, 255);
    assert_eq!(image.data.shape(), &[1, 2, 3]);
    assert_eq!(image.data[[0, 0, 0]], 1);
    assert_eq!(image.data[[0, 1, 2]], 6);
}

#[test]
fn test_parse_16bit_pixmap_big_endian() {
    let mut buffer = b"P6\n1 1\n65535\n".to_vec();
    buffer.extend_from_slice(&[0x01, 0x00, 0x02, 0x00, 0xFF, 0xFF]);
    let image = PnmImage::parse(&buffer).unwrap();

    assert_eq!(image.maxval, 65535);
    assert_eq!(image.data[[0, 0, 0]], 256);
    assert_eq!(image.data[[0, 0, 1]], 512);
    assert_eq!(image.data[[0, 0, 2]], 65535);
}

#[test]
fn test_parse_graymap() {
    let mut buffer = b"P5\n3 2\n255\n".to_vec();
    buffer.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
    let image = PnmImage::parse(&buffer).unwrap();

    assert_eq!(image.format, PnmFormat::Graymap);
    assert_eq!(image.data.shape(), &[2, 3, 1]);
    assert_eq!(image.data[[1, 2, 0]], 60);
}

#[test]
fn test_header_comments_skipped() {
    let mut buffer = b"P6\n# made by a decoder\n1 1\n# maxval next\n255\n".to_vec();
    buffer.extend_from_slice(&[7, 8, 9]);
    let image = PnmImage::parse(&buffer).unwrap();
    assert_eq!(image.data[[0, 0, 1]], 8);
}

#[test]
fn test_unknown_magic_rejected() {
    let buffer = b"P3\n1 1\n255\n1 2 3".to_vec();
    let err = PnmImage::parse(&buffer).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}

#[test]
fn test_truncated_body_rejected() {
    // Declares 2x2 but carries a single pixel
    let buffer = ppm8(2, 2, &[1, 2, 3]);
    let err = PnmImage::parse(&buffer).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}

#[test]
fn test_oversized_body_rejected() {
    let buffer = ppm8(1, 1, &[1, 2, 3, 4]);
    let err = PnmImage::parse(&buffer).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}

#[test]
fn test_missing_header_field_rejected() {
    let buffer = b"P6\n2\n".to_vec();
    let err = PnmImage::parse(&buffer).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}

#[test]
fn test_huge_dimensions_rejected_without_panic() {
    // Size product would overflow usize; must come back as a parse error
    let buffer = b"P6\n4294967296 4294967296\n255\n".to_vec();
    let err = PnmImage::parse(&buffer).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}

#[test]
fn test_zero_maxval_rejected() {
    let buffer = b"P6\n1 1\n0\n".to_vec();
    let err = PnmImage::parse(&buffer).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}

#[test]
fn test_empty_buffer_rejected() {
    let err = PnmImage::parse(&[]).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedIntermediateFormat(_)));
}
