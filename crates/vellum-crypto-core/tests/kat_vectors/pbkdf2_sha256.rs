//! PBKDF2-HMAC-SHA256 Known-Answer Tests (P = "password", S = "salt", dkLen = 32).
//!
//! Derived keys never leave the crate, so each vector is checked by sealing
//! the same block under the derived key and under the expected key: equal
//! ciphertexts mean equal keys.

use super::hex;
use vellum_crypto_core::symmetric::{Aes256Gcm, AuthenticatedCipher, NONCE_LEN};
use vellum_crypto_core::{KeyDerivation, Pbkdf2Sha256, SecretKey, KEY_LEN};

fn assert_derives(iterations: u32, expected_hex: &str) {
    let derived = Pbkdf2Sha256::new(iterations)
        .derive(b"password", b"salt")
        .expect("derive should succeed");

    let mut expected = [0u8; KEY_LEN];
    expected.copy_from_slice(&hex(expected_hex));
    let expected = SecretKey::new(expected);

    let nonce = [0u8; NONCE_LEN];
    let block = [0x5Au8; 32];
    let a = Aes256Gcm.seal(&derived, &nonce, &block).expect("seal should succeed");
    let b = Aes256Gcm.seal(&expected, &nonce, &block).expect("seal should succeed");
    assert_eq!(a, b, "PBKDF2 output mismatch at c = {iterations}");
}

#[test]
fn pbkdf2_sha256_c1() {
    assert_derives(
        1,
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b",
    );
}

#[test]
fn pbkdf2_sha256_c2() {
    assert_derives(
        2,
        "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43",
    );
}

#[test]
fn pbkdf2_sha256_c4096() {
    assert_derives(
        4096,
        "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a",
    );
}
