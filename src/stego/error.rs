// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from image decoding through
//! encryption and frame extraction.

use core::fmt;

use crate::raster::error::RasterError;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The passphrase is empty or was rejected by the key derivation.
    InvalidKey,
    /// The message does not fit in the cover image.
    InsufficientCapacity,
    /// The image is lossy, undecodable or too large.
    UnsupportedFormat(RasterError),
    /// The extracted frame is inconsistent (bad length, unknown cipher suite,
    /// truncated envelope, non-UTF-8 plaintext).
    CorruptPayload,
    /// AEAD tag mismatch (wrong passphrase or tampered pixels).
    AuthenticationFailed,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "invalid key (passphrase must not be empty)"),
            Self::InsufficientCapacity => write!(f, "image is too small for this message"),
            Self::UnsupportedFormat(e) => write!(f, "unsupported image: {e}"),
            Self::CorruptPayload => write!(f, "no valid hidden payload found in image"),
            Self::AuthenticationFailed => write!(f, "decryption failed (wrong key or modified image)"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedFormat(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RasterError> for StegoError {
    fn from(e: RasterError) -> Self {
        Self::UnsupportedFormat(e)
    }
}

pub type Result<T> = std::result::Result<T, StegoError>;
