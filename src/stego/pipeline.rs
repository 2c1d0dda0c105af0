// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encrypt/decrypt pipeline.
//!
//! Encrypt:
//! 1. Decode the cover into a pixel grid (lossless formats only)
//! 2. Derive the key from the passphrase and seal the message
//! 3. Frame the envelope with its length
//! 4. Write the frame into the pixel LSBs
//! 5. Encode the grid as PNG
//!
//! Decrypt runs the same steps backwards. Each call owns all of its buffers;
//! nothing is shared between calls.

use crate::raster::RasterImage;
use crate::stego::capacity;
use crate::stego::crypto::{self, CipherSuite};
use crate::stego::error::{Result, StegoError};
use crate::stego::frame;
use crate::stego::lsb;

/// Options for [`encrypt_image_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncryptOptions {
    /// Cipher used to seal the message. Decrypt reads it back from the image.
    pub suite: CipherSuite,
}

/// Hide `message` in a cover image, encrypted under `passphrase`.
///
/// # Arguments
/// - `image_bytes`: PNG, BMP or TIFF cover image.
/// - `message`: UTF-8 text to hide.
/// - `passphrase`: non-empty key.
///
/// # Returns
/// PNG bytes of the stego image.
///
/// # Errors
/// - [`StegoError::InvalidKey`] if `passphrase` is empty.
/// - [`StegoError::UnsupportedFormat`] if the cover is lossy, undecodable or too large.
/// - [`StegoError::InsufficientCapacity`] if the message does not fit.
pub fn encrypt_image(image_bytes: &[u8], message: &str, passphrase: &str) -> Result<Vec<u8>> {
    encrypt_image_with_options(image_bytes, message, passphrase, &EncryptOptions::default())
}

/// [`encrypt_image`] with an explicit cipher suite.
pub fn encrypt_image_with_options(
    image_bytes: &[u8],
    message: &str,
    passphrase: &str,
    options: &EncryptOptions,
) -> Result<Vec<u8>> {
    if passphrase.is_empty() {
        return Err(StegoError::InvalidKey);
    }

    let grid = RasterImage::from_bytes(image_bytes)?.into_grid();

    // Reject before paying for key derivation.
    if !capacity::fits(&grid, message.len()) {
        log::debug!(
            "message of {} bytes exceeds capacity of {} bytes",
            message.len(),
            capacity::max_message_len(&grid)
        );
        return Err(StegoError::InsufficientCapacity);
    }

    let key = crypto::derive_key(passphrase, options.suite)?;
    let envelope = crypto::encrypt(message.as_bytes(), &key)?;
    let framed = frame::frame(&envelope)?;

    log::debug!(
        "embedding {} frame bytes ({:?}) into {}x{} grid with {} bits capacity",
        framed.len(),
        options.suite,
        grid.width(),
        grid.height(),
        capacity::capacity_bits(&grid)
    );

    let stego = lsb::embed(grid, &framed)?;
    Ok(stego.to_png_bytes()?)
}

/// Recover the message hidden by [`encrypt_image`].
///
/// # Errors
/// - [`StegoError::InvalidKey`] if `passphrase` is empty.
/// - [`StegoError::UnsupportedFormat`] if the image is lossy, undecodable or too large.
/// - [`StegoError::CorruptPayload`] if no consistent frame is present.
/// - [`StegoError::AuthenticationFailed`] if the passphrase is wrong or the
///   pixels were modified.
pub fn decrypt_image(image_bytes: &[u8], passphrase: &str) -> Result<String> {
    if passphrase.is_empty() {
        return Err(StegoError::InvalidKey);
    }

    let grid = RasterImage::from_bytes(image_bytes)?.into_grid();
    let max_bytes = capacity::capacity_bytes(&grid);

    let framed = lsb::extract(&grid, max_bytes)?;
    let envelope = frame::unframe(&framed, max_bytes)?;

    let plaintext = crypto::open(envelope, passphrase).map_err(|e| {
        log::warn!("payload rejected: {e}");
        e
    })?;

    String::from_utf8(plaintext).map_err(|_| StegoError::CorruptPayload)
}

/// Largest message (in bytes) the image can hold.
///
/// # Errors
/// [`StegoError::UnsupportedFormat`] if the image cannot be decoded.
pub fn image_capacity(image_bytes: &[u8]) -> Result<usize> {
    let image = RasterImage::from_bytes(image_bytes)?;
    Ok(capacity::max_message_len(image.grid()))
}
