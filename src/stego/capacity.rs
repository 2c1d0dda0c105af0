// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embedding capacity of a pixel grid.
//!
//! Every pixel contributes one bit per RGB channel. The usable message size
//! is the whole-byte capacity minus the frame overhead (length prefix,
//! cipher suite id, nonce, auth tag).

use crate::raster::PixelGrid;
use crate::stego::frame::FRAME_OVERHEAD;
use crate::stego::lsb::BITS_PER_PIXEL;

/// Total LSB slots in the grid.
pub fn capacity_bits(grid: &PixelGrid) -> usize {
    grid.pixel_count() * BITS_PER_PIXEL
}

/// Whole bytes that fit in the grid, framing included.
pub fn capacity_bytes(grid: &PixelGrid) -> usize {
    capacity_bits(grid) / 8
}

/// Largest plaintext message (in bytes) that fits in the grid, or 0 if even
/// an empty message does not fit.
pub fn max_message_len(grid: &PixelGrid) -> usize {
    capacity_bytes(grid).saturating_sub(FRAME_OVERHEAD)
}

/// Whether a message of `message_len` bytes fits in the grid.
pub fn fits(grid: &PixelGrid, message_len: usize) -> bool {
    match message_len.checked_add(FRAME_OVERHEAD) {
        Some(frame_len) => frame_len <= capacity_bytes(grid),
        None => false,
    }
}
