// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding pipeline.
//!
//! A message is sealed with an AEAD cipher (AES-256-GCM-SIV by default,
//! ChaCha20-Poly1305 on request) under a key derived from the passphrase with
//! Argon2id, framed with a big-endian length prefix, and written one bit per
//! RGB sample into the least-significant bits of a lossless image.
//!
//! - [`crypto`]: key derivation and the sealed envelope
//! - [`frame`]: length-prefixed framing
//! - [`lsb`]: the pixel codec and its traversal order
//! - [`capacity`]: how much fits in a given grid
//!
//! Every entry point is a pure function over its input buffers. There is no
//! global state, so calls may run concurrently from any number of threads.

pub mod error;
pub mod crypto;
pub mod frame;
pub mod lsb;
pub mod capacity;
mod pipeline;

pub use error::StegoError;
pub use crypto::CipherSuite;
pub use pipeline::{decrypt_image, encrypt_image, encrypt_image_with_options, image_capacity, EncryptOptions};
