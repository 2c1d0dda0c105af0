// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for raster decoding and encoding.

use std::fmt;

/// Errors that can occur while turning image bytes into a pixel grid or back.
#[derive(Debug)]
pub enum RasterError {
    /// The leading bytes do not match any known image container.
    UnrecognizedFormat,
    /// The container is known but its codec discards low-order pixel bits.
    LossyFormat(&'static str),
    /// The container is lossless but not one this crate reads.
    UnsupportedContainer(&'static str),
    /// The raw sample buffer does not match width × height × channels.
    DimensionMismatch { expected: usize, actual: usize },
    /// The image exceeds [`MAX_DIMENSION`](super::MAX_DIMENSION) or
    /// [`MAX_PIXELS`](super::MAX_PIXELS).
    TooLarge { width: u32, height: u32 },
    /// The underlying codec rejected the input.
    Decode(image::ImageError),
    /// The PNG writer failed.
    Encode(image::ImageError),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedFormat => write!(f, "unrecognized image format"),
            Self::LossyFormat(name) => write!(f, "{name} is lossy and cannot carry LSB data"),
            Self::UnsupportedContainer(name) => write!(f, "unsupported image container: {name}"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} samples, expected {expected}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "image too large: {width}x{height}")
            }
            Self::Decode(e) => write!(f, "image decode failed: {e}"),
            Self::Encode(e) => write!(f, "PNG encode failed: {e}"),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) | Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;
