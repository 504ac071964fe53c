#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the passphrase envelope.
//!
//! Uses a low-iteration KDF: the properties concern sealing and opening, not
//! work factor, and 100k rounds per case would dominate the run.

use proptest::prelude::*;
use vellum_crypto_core::{open_with, seal_with, Aes256Gcm, CryptoError, Pbkdf2Sha256};

const FAST: Pbkdf2Sha256 = Pbkdf2Sha256::new(4);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Seal→open with the same passphrase recovers the plaintext.
    #[test]
    fn seal_open_roundtrip(
        plaintext in ".{0,512}",
        passphrase in ".{0,64}",
    ) {
        let sealed = seal_with(&FAST, &Aes256Gcm, plaintext.as_bytes(), &passphrase)
            .expect("seal should succeed");
        let opened = open_with(&FAST, &Aes256Gcm, &sealed, &passphrase)
            .expect("open should succeed");
        prop_assert_eq!(opened.expose(), plaintext.as_bytes());
    }

    /// Opening with a different passphrase always fails, never returns garbage.
    #[test]
    fn wrong_passphrase_always_fails(
        plaintext in ".{0,256}",
        k1 in "[a-z ]{1,32}",
        k2 in "[a-z ]{1,32}",
    ) {
        prop_assume!(k1 != k2);
        let sealed = seal_with(&FAST, &Aes256Gcm, plaintext.as_bytes(), &k1)
            .expect("seal should succeed");
        let result = open_with(&FAST, &Aes256Gcm, &sealed, &k2);
        prop_assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    /// Flipping any byte of `ciphertext || tag` is detected.
    #[test]
    fn tampering_detected(
        plaintext in proptest::collection::vec(any::<u8>(), 1..256),
        flip in any::<prop::sample::Index>(),
    ) {
        let mut sealed = seal_with(&FAST, &Aes256Gcm, &plaintext, "pw")
            .expect("seal should succeed");
        let mut bytes = data_encoding::BASE64.decode(sealed.data.as_bytes()).unwrap();
        let i = flip.index(bytes.len());
        bytes[i] ^= 0x01;
        sealed.data = data_encoding::BASE64.encode(&bytes);
        prop_assert!(open_with(&FAST, &Aes256Gcm, &sealed, "pw").is_err());
    }
}
