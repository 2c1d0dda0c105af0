// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload frame construction and parsing.
//!
//! The frame is the self-describing container written into the pixel LSBs:
//!
//! ```text
//! [4 bytes] envelope length (big-endian u32)
//! [N bytes] sealed envelope (suite id + nonce + ciphertext + tag)
//! ```
//!
//! Integrity is provided by the AEAD tag inside the envelope. The length
//! prefix only lets the extractor know where to stop reading.

use crate::stego::crypto::SEALED_OVERHEAD;
use crate::stego::error::{Result, StegoError};

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Total bytes added around a plaintext message:
/// length(4) + suite(1) + nonce(12) + tag(16) = 33.
pub const FRAME_OVERHEAD: usize = LENGTH_PREFIX_LEN + SEALED_OVERHEAD; // 33

/// Build a frame around an envelope.
///
/// # Errors
/// [`StegoError::InsufficientCapacity`] if the envelope is longer than the
/// u32 length field can describe.
pub fn frame(envelope: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(envelope.len()).map_err(|_| StegoError::InsufficientCapacity)?;
    let mut out = Vec::with_capacity(LENGTH_PREFIX_LEN + envelope.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(envelope);
    Ok(out)
}

/// Read the declared envelope length from the first four bytes.
pub fn declared_len(data: &[u8]) -> Result<usize> {
    let prefix: [u8; LENGTH_PREFIX_LEN] = data
        .get(..LENGTH_PREFIX_LEN)
        .and_then(|p| p.try_into().ok())
        .ok_or(StegoError::CorruptPayload)?;
    Ok(u32::from_be_bytes(prefix) as usize)
}

/// Parse a frame and return the envelope it carries.
///
/// `data` may be longer than the frame; bytes after the declared envelope
/// are ignored.
///
/// # Errors
/// [`StegoError::CorruptPayload`] if `data` is shorter than the prefix, the
/// declared length exceeds `max_len`, or fewer bytes follow than declared.
pub fn unframe(data: &[u8], max_len: usize) -> Result<&[u8]> {
    let len = declared_len(data)?;
    if len > max_len {
        return Err(StegoError::CorruptPayload);
    }
    let end = LENGTH_PREFIX_LEN.checked_add(len).ok_or(StegoError::CorruptPayload)?;
    data.get(LENGTH_PREFIX_LEN..end).ok_or(StegoError::CorruptPayload)
}
