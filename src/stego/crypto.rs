// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Key derivation and authenticated encryption of the message.
//!
//! Keys are derived with Argon2id from the passphrase and a fixed salt that is
//! specific to each [`CipherSuite`], so one passphrase maps to one key per
//! suite and nothing key-related has to be stored in the image.
//!
//! Encryption produces a sealed envelope:
//!
//! ```text
//! [1 byte  ] cipher suite id
//! [12 bytes] random nonce
//! [N bytes ] AEAD ciphertext (plaintext_len + 16 bytes for the auth tag)
//! ```
//!
//! AES-256-GCM-SIV is the default suite. Its nonce-misuse resistance matters
//! here because the key is a pure function of the passphrase, so every
//! message encrypted under one passphrase shares a key and only the random
//! nonce separates them.

use argon2::Argon2;
use core::fmt;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::stego::error::{Result, StegoError};

/// Derived key length in bytes (256-bit).
pub const KEY_LEN: usize = 32;
/// AEAD nonce length in bytes (both suites).
pub const NONCE_LEN: usize = 12;
/// AEAD authentication tag length in bytes (both suites).
pub const TAG_LEN: usize = 16;
/// Envelope bytes on top of the plaintext: suite id + nonce + tag.
pub const SEALED_OVERHEAD: usize = 1 + NONCE_LEN + TAG_LEN; // 29

/// Fixed Argon2 salt for AES-256-GCM-SIV keys.
const AES_KEY_SALT: &[u8; 16] = b"lsbveil-aes-v1\0\0";

/// Fixed Argon2 salt for ChaCha20-Poly1305 keys.
/// Different from the AES salt so the two suites never share a key.
const CHACHA_KEY_SALT: &[u8; 16] = b"lsbveil-cc20-v1\0";

/// Authenticated ciphers a message can be sealed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CipherSuite {
    /// AES-256-GCM-SIV (id `0x01`).
    #[default]
    Aes256GcmSiv,
    /// ChaCha20-Poly1305 (id `0x02`).
    ChaCha20Poly1305,
}

impl CipherSuite {
    /// Identifier byte stored at the start of the envelope.
    pub fn id(self) -> u8 {
        match self {
            Self::Aes256GcmSiv => 0x01,
            Self::ChaCha20Poly1305 => 0x02,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::Aes256GcmSiv),
            0x02 => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    fn kdf_salt(self) -> &'static [u8; 16] {
        match self {
            Self::Aes256GcmSiv => AES_KEY_SALT,
            Self::ChaCha20Poly1305 => CHACHA_KEY_SALT,
        }
    }
}

/// A 256-bit key bound to the suite it was derived for.
///
/// The key bytes are wiped on drop.
pub struct DerivedKey {
    suite: CipherSuite,
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("suite", &self.suite)
            .field("bytes", &"<redacted>")
            .finish()
    }
}

/// Derive the key for `suite` from a passphrase.
///
/// Deterministic: the same passphrase and suite always give the same key.
///
/// # Errors
/// [`StegoError::InvalidKey`] if the passphrase is empty or Argon2 rejects it.
pub fn derive_key(passphrase: &str, suite: CipherSuite) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(StegoError::InvalidKey);
    }
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), suite.kdf_salt(), &mut *bytes)
        .map_err(|_| StegoError::InvalidKey)?;
    Ok(DerivedKey { suite, bytes })
}

/// Encrypt plaintext into a sealed envelope with a fresh random nonce.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    encrypt_with_nonce(plaintext, key, &nonce)
}

/// Encrypt plaintext into a sealed envelope using a caller-provided nonce.
///
/// Reusing a nonce under the same key leaks plaintext equality; callers
/// outside tests should use [`encrypt`].
///
/// # Errors
/// [`StegoError::InsufficientCapacity`] if the AEAD refuses the plaintext.
/// Its only refusal is a plaintext above the cipher's length limit, far
/// beyond anything a [`MAX_PIXELS`](crate::MAX_PIXELS) image can carry.
pub fn encrypt_with_nonce(plaintext: &[u8], key: &DerivedKey, nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
    let ciphertext = match key.suite {
        CipherSuite::Aes256GcmSiv => {
            use aes_gcm_siv::aead::{Aead, KeyInit};
            use aes_gcm_siv::{Aes256GcmSiv, Nonce};
            let cipher = Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| StegoError::InvalidKey)?;
            // Plaintext over the AEAD length limit.
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| StegoError::InsufficientCapacity)?
        }
        CipherSuite::ChaCha20Poly1305 => {
            use chacha20poly1305::aead::{Aead, KeyInit};
            use chacha20poly1305::{ChaCha20Poly1305, Nonce};
            let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| StegoError::InvalidKey)?;
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| StegoError::InsufficientCapacity)?
        }
    };

    let mut envelope = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    envelope.push(key.suite.id());
    envelope.extend_from_slice(nonce);
    envelope.extend_from_slice(&ciphertext);
    Ok(envelope)
}

/// Read the cipher suite named by an envelope without decrypting it.
///
/// # Errors
/// [`StegoError::CorruptPayload`] if the envelope is shorter than
/// [`SEALED_OVERHEAD`] or the suite id is unknown.
pub fn envelope_suite(envelope: &[u8]) -> Result<CipherSuite> {
    if envelope.len() < SEALED_OVERHEAD {
        return Err(StegoError::CorruptPayload);
    }
    CipherSuite::from_id(envelope[0]).ok_or(StegoError::CorruptPayload)
}

/// Decrypt a sealed envelope.
///
/// Returns the plaintext, or [`StegoError::AuthenticationFailed`] if the key
/// is wrong, the key belongs to another suite, or the data was modified.
pub fn decrypt(envelope: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    let suite = envelope_suite(envelope)?;
    if suite != key.suite {
        return Err(StegoError::AuthenticationFailed);
    }
    let nonce = &envelope[1..1 + NONCE_LEN];
    let ciphertext = &envelope[1 + NONCE_LEN..];

    match suite {
        CipherSuite::Aes256GcmSiv => {
            use aes_gcm_siv::aead::{Aead, KeyInit};
            use aes_gcm_siv::{Aes256GcmSiv, Nonce};
            let cipher = Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| StegoError::InvalidKey)?;
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| StegoError::AuthenticationFailed)
        }
        CipherSuite::ChaCha20Poly1305 => {
            use chacha20poly1305::aead::{Aead, KeyInit};
            use chacha20poly1305::{ChaCha20Poly1305, Nonce};
            let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| StegoError::InvalidKey)?;
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| StegoError::AuthenticationFailed)
        }
    }
}

/// Derive a key for `suite` and seal `plaintext` in one step.
pub fn seal(plaintext: &[u8], passphrase: &str, suite: CipherSuite) -> Result<Vec<u8>> {
    let key = derive_key(passphrase, suite)?;
    encrypt(plaintext, &key)
}

/// Derive the key for whichever suite the envelope names and decrypt it.
pub fn open(envelope: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let suite = envelope_suite(envelope)?;
    let key = derive_key(passphrase, suite)?;
    decrypt(envelope, &key)
}
