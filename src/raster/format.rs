// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Container detection and the lossless-only policy.
//!
//! LSB payloads survive only in formats that store every sample exactly.
//! Detection is by magic bytes, never by file name or MIME type.

use image::ImageFormat;

use super::error::{RasterError, Result};

/// Image containers accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Bmp,
    Tiff,
}

impl RasterFormat {
    /// Detect the container from its leading bytes.
    ///
    /// # Errors
    /// - [`RasterError::LossyFormat`] for JPEG, WebP and AVIF.
    /// - [`RasterError::UnsupportedContainer`] for other known containers.
    /// - [`RasterError::UnrecognizedFormat`] when no signature matches.
    pub fn sniff(data: &[u8]) -> Result<Self> {
        let format = image::guess_format(data).map_err(|_| RasterError::UnrecognizedFormat)?;
        match format {
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Bmp => Ok(Self::Bmp),
            ImageFormat::Tiff => Ok(Self::Tiff),
            ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Avif => {
                Err(RasterError::LossyFormat(format_name(format)))
            }
            other => Err(RasterError::UnsupportedContainer(format_name(other))),
        }
    }

    /// The matching `image` crate format.
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("unknown")
}
