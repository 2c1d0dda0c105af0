// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # lsbveil-core
//!
//! Hides passphrase-encrypted text messages in the least-significant bits of
//! lossless images, and recovers them.
//!
//! The raster layer (`raster` module) reads PNG, BMP and TIFF covers into an
//! 8-bit RGB(A) pixel grid and always writes PNG. The steganography layer
//! (`stego` module) uses Argon2id key derivation, AES-256-GCM-SIV (or
//! ChaCha20-Poly1305) encryption and a fixed row-major R, G, B bit order.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use lsbveil_core::{encrypt_image, decrypt_image};
//!
//! let cover_png = std::fs::read("cover.png").unwrap();
//! let stego = encrypt_image(&cover_png, "secret message", "passphrase").unwrap();
//! let decoded = decrypt_image(&stego, "passphrase").unwrap();
//! assert_eq!(decoded, "secret message");
//! ```

pub mod raster;
pub mod stego;

pub use raster::error::{RasterError, Result as RasterResult};
pub use raster::format::RasterFormat;
pub use raster::{PixelGrid, PixelLayout, RasterImage, MAX_DIMENSION, MAX_PIXELS};
pub use stego::{decrypt_image, encrypt_image, encrypt_image_with_options, image_capacity};
pub use stego::{CipherSuite, EncryptOptions, StegoError};
