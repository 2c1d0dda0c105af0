// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-trip integration tests for encrypt/decrypt.

mod common;

use common::{encode_as, init_logging, load_rgb, noise_png, noise_rgb, noise_rgba};
use image::{DynamicImage, ImageOutputFormat};
use lsbveil_core::{
    decrypt_image, encrypt_image, encrypt_image_with_options, CipherSuite, EncryptOptions,
    RasterError, StegoError,
};

#[test]
fn roundtrip_basic() {
    init_logging();
    let cover = noise_png(64, 48, 1);
    let message = "Hello, steganography!";
    let passphrase = "test-passphrase-123";

    let stego = encrypt_image(&cover, message, passphrase).unwrap();
    assert_eq!(decrypt_image(&stego, passphrase).unwrap(), message);
}

#[test]
fn ten_by_ten_scenario() {
    let cover = noise_png(10, 10, 2);
    let stego = encrypt_image(&cover, "hi", "pw1").unwrap();

    assert_eq!(decrypt_image(&stego, "pw1").unwrap(), "hi");

    match decrypt_image(&stego, "pw2") {
        Err(StegoError::AuthenticationFailed) | Err(StegoError::CorruptPayload) => {}
        other => panic!("expected explicit failure with wrong key, got {other:?}"),
    }
}

#[test]
fn wrong_keys_never_succeed() {
    let cover = noise_png(32, 32, 3);
    let stego = encrypt_image(&cover, "the real message", "correct horse").unwrap();
    for wrong in ["correct horsE", "correct horse ", "c", "battery staple"] {
        let result = decrypt_image(&stego, wrong);
        assert!(
            matches!(result, Err(StegoError::AuthenticationFailed) | Err(StegoError::CorruptPayload)),
            "key {wrong:?} produced {result:?}"
        );
    }
}

#[test]
fn roundtrip_empty_message() {
    let cover = noise_png(16, 16, 4);
    let stego = encrypt_image(&cover, "", "pass").unwrap();
    assert_eq!(decrypt_image(&stego, "pass").unwrap(), "");
}

#[test]
fn roundtrip_unicode_message() {
    let cover = noise_png(40, 40, 5);
    let message = "Grüße 👋 — 秘密のメッセージ";
    let stego = encrypt_image(&cover, message, "ключ").unwrap();
    assert_eq!(decrypt_image(&stego, "ключ").unwrap(), message);
}

#[test]
fn roundtrip_long_message() {
    let cover = noise_png(200, 150, 6);
    let message = "lorem ipsum dolor sit amet ".repeat(400);
    let stego = encrypt_image(&cover, &message, "pass").unwrap();
    assert_eq!(decrypt_image(&stego, "pass").unwrap(), message);
}

#[test]
fn both_cipher_suites() {
    let cover = noise_png(24, 24, 7);
    for suite in [CipherSuite::Aes256GcmSiv, CipherSuite::ChaCha20Poly1305] {
        let options = EncryptOptions { suite };
        let stego = encrypt_image_with_options(&cover, "suite test", "pass", &options).unwrap();
        assert_eq!(decrypt_image(&stego, "pass").unwrap(), "suite test");
    }
}

#[test]
fn decode_is_idempotent() {
    let cover = noise_png(20, 20, 8);
    let stego = encrypt_image(&cover, "twice", "pass").unwrap();
    let first = decrypt_image(&stego, "pass").unwrap();
    let second = decrypt_image(&stego, "pass").unwrap();
    assert_eq!(first, "twice");
    assert_eq!(first, second);
}

#[test]
fn encryptions_differ_but_both_decode() {
    let cover = noise_png(20, 20, 9);
    let a = encrypt_image(&cover, "same", "pass").unwrap();
    let b = encrypt_image(&cover, "same", "pass").unwrap();
    assert_ne!(a, b, "fresh nonce per call should change the pixels");
    assert_eq!(decrypt_image(&a, "pass").unwrap(), "same");
    assert_eq!(decrypt_image(&b, "pass").unwrap(), "same");
}

#[test]
fn stego_is_png_with_same_dimensions() {
    let cover = noise_png(33, 17, 10);
    let stego = encrypt_image(&cover, "dims", "pass").unwrap();
    assert_eq!(&stego[..8], b"\x89PNG\r\n\x1a\n");
    let img = load_rgb(&stego);
    assert_eq!((img.width(), img.height()), (33, 17));
}

#[test]
fn rgba_cover_keeps_alpha() {
    let src = noise_rgba(30, 30, 11);
    let cover = encode_as(DynamicImage::ImageRgba8(src.clone()), ImageOutputFormat::Png);
    let stego = encrypt_image(&cover, "alpha stays", "pass").unwrap();

    let out = image::load_from_memory(&stego).unwrap().into_rgba8();
    for (a, b) in src.pixels().zip(out.pixels()) {
        assert_eq!(a[3], b[3]);
    }
    assert_eq!(decrypt_image(&stego, "pass").unwrap(), "alpha stays");
}

#[test]
fn bmp_and_tiff_covers() {
    let src = noise_rgb(30, 20, 12);
    for format in [ImageOutputFormat::Bmp, ImageOutputFormat::Tiff] {
        let cover = encode_as(DynamicImage::ImageRgb8(src.clone()), format);
        let stego = encrypt_image(&cover, "not a png", "pass").unwrap();
        assert_eq!(decrypt_image(&stego, "pass").unwrap(), "not a png");
    }
}

#[test]
fn stego_survives_bmp_reencode() {
    // BMP is lossless, so a stego PNG converted to BMP still decodes.
    let cover = noise_png(30, 30, 13);
    let stego = encrypt_image(&cover, "portable", "pass").unwrap();
    let bmp = encode_as(DynamicImage::ImageRgb8(load_rgb(&stego)), ImageOutputFormat::Bmp);
    assert_eq!(decrypt_image(&bmp, "pass").unwrap(), "portable");
}

#[test]
fn jpeg_cover_rejected() {
    let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    assert!(matches!(
        encrypt_image(&jpeg, "hi", "pass"),
        Err(StegoError::UnsupportedFormat(RasterError::LossyFormat(_)))
    ));
    assert!(matches!(
        decrypt_image(&jpeg, "pass"),
        Err(StegoError::UnsupportedFormat(RasterError::LossyFormat(_)))
    ));
}

#[test]
fn garbage_bytes_rejected() {
    assert!(matches!(
        encrypt_image(b"definitely not an image", "hi", "pass"),
        Err(StegoError::UnsupportedFormat(_))
    ));
    assert!(matches!(decrypt_image(&[], "pass"), Err(StegoError::UnsupportedFormat(_))));
}

#[test]
fn clean_cover_has_no_message() {
    // Noise LSBs decode to a random length prefix; whatever it says, the
    // result must be an error and never a panic.
    for seed in 0..8 {
        let cover = noise_png(50, 50, 100 + seed);
        let result = decrypt_image(&cover, "pass");
        assert!(
            matches!(result, Err(StegoError::CorruptPayload) | Err(StegoError::AuthenticationFailed)),
            "seed {seed}: {result:?}"
        );
    }
}

#[test]
fn tampered_ciphertext_detected() {
    let cover = noise_png(30, 30, 14);
    let stego = encrypt_image(&cover, "tamper me", "pass").unwrap();

    // Frame is 4 + 29 + 9 = 42 bytes (slots 0..336). Slot 200 is pixel 66
    // (x=6, y=2), blue, inside the AEAD ciphertext.
    let mut img = load_rgb(&stego);
    img.get_pixel_mut(6, 2)[2] ^= 1;
    let tampered = encode_as(DynamicImage::ImageRgb8(img), ImageOutputFormat::Png);

    assert!(matches!(decrypt_image(&tampered, "pass"), Err(StegoError::AuthenticationFailed)));
}

#[test]
fn tampered_length_prefix_detected() {
    let cover = noise_png(30, 30, 15);
    let stego = encrypt_image(&cover, "length", "pass").unwrap();

    // Slot 31 is the lowest bit of the length prefix: pixel 10, green.
    let mut img = load_rgb(&stego);
    img.get_pixel_mut(10, 0)[1] ^= 1;
    let tampered = encode_as(DynamicImage::ImageRgb8(img), ImageOutputFormat::Png);

    let result = decrypt_image(&tampered, "pass");
    assert!(
        matches!(result, Err(StegoError::AuthenticationFailed) | Err(StegoError::CorruptPayload)),
        "{result:?}"
    );
}

#[test]
fn concurrent_requests_are_independent() {
    let cover = noise_png(48, 48, 16);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cover = &cover;
                scope.spawn(move || {
                    let message = format!("message number {i}");
                    let key = format!("key-{i}");
                    let stego = encrypt_image(cover, &message, &key).unwrap();
                    (message, decrypt_image(&stego, &key).unwrap())
                })
            })
            .collect();
        for handle in handles {
            let (sent, received) = handle.join().unwrap();
            assert_eq!(sent, received);
        }
    });
}
