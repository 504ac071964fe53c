//! NIST SP 800-38D: AES-256-GCM Known-Answer Test vectors.
//!
//! Runs the official GCMEncryptExtIV256 cases through the [`Aes256Gcm`]
//! adapter and checks that the adapter emits `ciphertext || tag`.

use super::hex;
use vellum_crypto_core::symmetric::{Aes256Gcm, AuthenticatedCipher, NONCE_LEN, TAG_LEN};
use vellum_crypto_core::{SecretKey, KEY_LEN};

/// NIST Test Case 13: zero key, zero IV, empty plaintext.
///
/// Tag: 530f8afbc74536b9a963b4f1c4cb738b
#[test]
fn nist_test_case_13_empty_plaintext() {
    let key = SecretKey::new([0u8; KEY_LEN]);
    let nonce = [0u8; NONCE_LEN];

    let sealed = Aes256Gcm.seal(&key, &nonce, &[]).expect("seal should succeed");
    assert_eq!(sealed, hex("530f8afbc74536b9a963b4f1c4cb738b"));

    let opened = Aes256Gcm.open(&key, &nonce, &sealed).expect("open should succeed");
    assert!(opened.is_empty());
}

/// NIST Test Case 14: zero key, zero IV, 16 zero bytes of plaintext.
///
/// CT:  cea7403d4d606b6e074ec5d3baf39d18
/// Tag: d0d1c8a799996bf0265b98b5d48ab919
#[test]
fn nist_test_case_14_single_block() {
    let key = SecretKey::new([0u8; KEY_LEN]);
    let nonce = [0u8; NONCE_LEN];
    let plaintext = [0u8; 16];

    let sealed = Aes256Gcm.seal(&key, &nonce, &plaintext).expect("seal should succeed");
    let (ct, tag) = sealed.split_at(sealed.len() - TAG_LEN);
    assert_eq!(ct, hex("cea7403d4d606b6e074ec5d3baf39d18").as_slice(), "ciphertext mismatch");
    assert_eq!(tag, hex("d0d1c8a799996bf0265b98b5d48ab919").as_slice(), "tag mismatch");

    let opened = Aes256Gcm.open(&key, &nonce, &sealed).expect("open should succeed");
    assert_eq!(opened.expose(), &plaintext);
}
