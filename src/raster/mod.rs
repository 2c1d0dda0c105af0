// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Lossless raster adapter.
//!
//! Decodes PNG, BMP and TIFF containers into a [`PixelGrid`] of 8-bit RGB or
//! RGBA samples and writes grids back out as PNG. Every sample value written
//! by the embedder survives the round-trip exactly.
//!
//! Supports:
//! - Any bit depth or colour type the `image` codecs read, normalised to
//!   8-bit RGB (no alpha in the source) or 8-bit RGBA (alpha in the source)
//! - Magic-byte container detection ([`RasterFormat::sniff`])
//!
//! Does NOT support:
//! - Lossy containers (JPEG, WebP, AVIF) -- rejected before decoding
//! - Images larger than [`MAX_DIMENSION`] per side or [`MAX_PIXELS`] total

pub mod error;
pub mod format;

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::io::Reader;
use image::{ColorType, ImageEncoder};

use error::{RasterError, Result};
use format::RasterFormat;

/// Maximum pixel dimension (width or height) accepted on decode.
pub const MAX_DIMENSION: u32 = 16_384;

/// Maximum total pixel count (width × height) accepted on decode.
pub const MAX_PIXELS: u64 = 64_000_000;

/// Validate image dimensions before any pixel buffer is allocated.
///
/// # Errors
/// [`RasterError::TooLarge`] if either side exceeds [`MAX_DIMENSION`] or the
/// total exceeds [`MAX_PIXELS`].
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    let pixels = u64::from(width) * u64::from(height);
    if width > MAX_DIMENSION || height > MAX_DIMENSION || pixels > MAX_PIXELS {
        return Err(RasterError::TooLarge { width, height });
    }
    Ok(())
}

/// Channel layout of a [`PixelGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelLayout {
    /// Samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    fn color_type(self) -> ColorType {
        match self {
            Self::Rgb => ColorType::Rgb8,
            Self::Rgba => ColorType::Rgba8,
        }
    }
}

/// Row-major grid of interleaved 8-bit samples.
///
/// Sample `c` of the pixel at column `x`, row `y` lives at
/// `(y * width + x) * channels + c`. The sample count is fixed at
/// construction; only sample values can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: PixelLayout,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Wrap an interleaved sample buffer.
    ///
    /// # Errors
    /// [`RasterError::DimensionMismatch`] if `samples.len()` is not
    /// `width * height * layout.channels()`.
    pub fn from_raw(width: u32, height: u32, layout: PixelLayout, samples: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * layout.channels();
        if samples.len() != expected {
            return Err(RasterError::DimensionMismatch { expected, actual: samples.len() });
        }
        Ok(Self { width, height, layout, samples })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(width: u32, height: u32, layout: PixelLayout, value: u8) -> Self {
        let len = width as usize * height as usize * layout.channels();
        Self { width, height, layout, samples: vec![value; len] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Samples per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The samples of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let c = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.samples[start..start + c]
    }

    /// All samples, row-major and interleaved.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable access to sample values. The length cannot change.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Encode the grid as a PNG file.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&self.samples, self.width, self.height, self.layout.color_type())
            .map_err(RasterError::Encode)?;
        Ok(out)
    }
}

/// A decoded cover or stego image.
#[derive(Debug, Clone)]
pub struct RasterImage {
    format: RasterFormat,
    grid: PixelGrid,
}

impl RasterImage {
    /// Decode an image from its container bytes.
    ///
    /// The header is read first so oversized images are rejected before the
    /// pixel buffer is allocated.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let format = RasterFormat::sniff(data)?;

        let (width, height) = Reader::with_format(Cursor::new(data), format.image_format())
            .into_dimensions()
            .map_err(RasterError::Decode)?;
        validate_dimensions(width, height)?;

        let decoded = Reader::with_format(Cursor::new(data), format.image_format())
            .decode()
            .map_err(RasterError::Decode)?;

        let grid = if decoded.color().has_alpha() {
            let rgba = decoded.into_rgba8();
            PixelGrid::from_raw(rgba.width(), rgba.height(), PixelLayout::Rgba, rgba.into_raw())?
        } else {
            let rgb = decoded.into_rgb8();
            PixelGrid::from_raw(rgb.width(), rgb.height(), PixelLayout::Rgb, rgb.into_raw())?
        };

        log::debug!(
            "decoded {:?} image {}x{} as {:?}",
            format,
            grid.width(),
            grid.height(),
            grid.layout()
        );

        Ok(Self { format, grid })
    }

    /// Container the image was decoded from.
    pub fn format(&self) -> RasterFormat {
        self.format
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }
}
