// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Least-significant-bit pixel codec.
//!
//! # Traversal order
//!
//! Embedding and extraction visit the same sequence of *slots*, one slot per
//! payload bit:
//!
//! 1. Pixels in row-major order: `(0,0), (1,0), … (w-1,0), (0,1), …`
//! 2. Within a pixel, channels in [`CHANNEL_ORDER`]: red, green, blue.
//!    Alpha is never visited.
//! 3. Payload bits MSB first within each byte, bytes in order.
//!
//! So slot `k` is sample `(k / 3) * channels + CHANNEL_ORDER[k % 3]` of the
//! flat grid ([`slot_offset`]). This mapping is computed here from the grid's
//! own layout; it does not depend on how any image library iterates pixels.
//!
//! Only bit 0 of a visited sample is written. Samples after the last payload
//! bit are never touched.

use crate::raster::PixelGrid;
use crate::stego::capacity::capacity_bits;
use crate::stego::error::{Result, StegoError};
use crate::stego::frame::{self, LENGTH_PREFIX_LEN};

/// Sample indices visited within each pixel, in order (R, G, B).
pub const CHANNEL_ORDER: [usize; 3] = [0, 1, 2];

/// Payload bits stored per pixel.
pub const BITS_PER_PIXEL: usize = CHANNEL_ORDER.len();

/// Flat sample offset of embedding slot `slot` in a grid with `channels`
/// samples per pixel.
#[inline]
pub fn slot_offset(slot: usize, channels: usize) -> usize {
    let pixel = slot / BITS_PER_PIXEL;
    pixel * channels + CHANNEL_ORDER[slot % BITS_PER_PIXEL]
}

/// Write `payload` into the LSBs of `grid`.
///
/// Takes ownership of the grid and returns it modified.
///
/// # Errors
/// [`StegoError::InsufficientCapacity`] if `payload.len() * 8` exceeds the
/// grid's capacity. The check runs before any sample is written.
pub fn embed(mut grid: PixelGrid, payload: &[u8]) -> Result<PixelGrid> {
    let capacity = capacity_bits(&grid);
    let needed = payload.len().checked_mul(8).ok_or(StegoError::InsufficientCapacity)?;
    if needed > capacity {
        return Err(StegoError::InsufficientCapacity);
    }

    let channels = grid.channels();
    let samples = grid.samples_mut();
    for (index, &byte) in payload.iter().enumerate() {
        let first_slot = index * 8;
        for shift in 0..8 {
            let bit = (byte >> (7 - shift)) & 1;
            let sample = &mut samples[slot_offset(first_slot + shift, channels)];
            *sample = (*sample & 0xFE) | bit;
        }
    }

    Ok(grid)
}

/// Sequential reader over the slot sequence.
struct SlotReader<'a> {
    samples: &'a [u8],
    channels: usize,
    capacity: usize,
    next: usize,
}

impl<'a> SlotReader<'a> {
    fn new(grid: &'a PixelGrid) -> Self {
        Self {
            samples: grid.samples(),
            channels: grid.channels(),
            capacity: capacity_bits(grid),
            next: 0,
        }
    }

    /// Next 8 slots as one byte, MSB first.
    fn next_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        for slot in self.next..self.next + 8 {
            byte = (byte << 1) | (self.samples[slot_offset(slot, self.channels)] & 1);
        }
        self.next += 8;
        byte
    }

    /// Read the next `count` bytes (`count * 8` slots) into `out`.
    fn read_into(&mut self, count: usize, out: &mut Vec<u8>) -> Result<()> {
        let bit_count = count.checked_mul(8).ok_or(StegoError::CorruptPayload)?;
        if bit_count > self.capacity - self.next {
            return Err(StegoError::CorruptPayload);
        }
        out.reserve(count);
        for _ in 0..count {
            out.push(self.next_byte());
        }
        Ok(())
    }
}

/// Read a length-prefixed frame back out of the LSBs of `grid`.
///
/// Reads the 4-byte prefix, then exactly the declared number of bytes, then
/// stops. `max_bytes` bounds the whole frame (prefix included).
///
/// # Errors
/// [`StegoError::CorruptPayload`] if the grid cannot hold a prefix, or the
/// declared frame is larger than `max_bytes` or the grid's capacity.
pub fn extract(grid: &PixelGrid, max_bytes: usize) -> Result<Vec<u8>> {
    let mut reader = SlotReader::new(grid);

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_LEN);
    reader.read_into(LENGTH_PREFIX_LEN, &mut framed)?;
    let len = frame::declared_len(&framed)?;
    let total = LENGTH_PREFIX_LEN.checked_add(len).ok_or(StegoError::CorruptPayload)?;
    if total > max_bytes || total > reader.capacity / 8 {
        log::debug!(
            "declared frame of {total} bytes exceeds bound (max {max_bytes}, capacity {} bytes)",
            reader.capacity / 8
        );
        return Err(StegoError::CorruptPayload);
    }

    reader.read_into(len, &mut framed)?;
    Ok(framed)
}
