// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Cover-image builders shared by the integration tests.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic RGB noise image.
pub fn noise_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]))
}

/// Deterministic RGBA noise image with a varying alpha channel.
pub fn noise_rgba(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    RgbaImage::from_fn(width, height, |_, _| Rgba([rng.gen(), rng.gen(), rng.gen(), rng.gen()]))
}

pub fn encode_as(img: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

pub fn noise_png(width: u32, height: u32, seed: u64) -> Vec<u8> {
    encode_as(DynamicImage::ImageRgb8(noise_rgb(width, height, seed)), ImageOutputFormat::Png)
}

/// Decode any test image to RGB8 through the `image` crate directly.
pub fn load_rgb(bytes: &[u8]) -> RgbImage {
    image::load_from_memory(bytes).unwrap().into_rgb8()
}
