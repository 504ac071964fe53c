//! Every decryption failure renders identically.
//!
//! Distinct messages for "bad tag" vs "bad base64" vs "wrong algorithm"
//! would let a caller map out the format; all of them must read the same.

use vellum_crypto_core::{open_with, seal_with, Aes256Gcm, EncryptedData, Pbkdf2Sha256};

const FAST: Pbkdf2Sha256 = Pbkdf2Sha256::new(4);

fn sealed() -> EncryptedData {
    seal_with(&FAST, &Aes256Gcm, b"top secret", "right").expect("seal should succeed")
}

fn failure_text(record: &EncryptedData, passphrase: &str) -> String {
    open_with(&FAST, &Aes256Gcm, record, passphrase)
        .expect_err("open should fail")
        .to_string()
}

#[test]
fn all_failure_modes_share_one_message() {
    let wrong_passphrase = failure_text(&sealed(), "wrong");

    let mut bad_algorithm = sealed();
    bad_algorithm.algorithm = "ChaCha20-Poly1305".into();

    let mut bad_base64 = sealed();
    bad_base64.iv = "%%%".into();

    let mut short_data = sealed();
    short_data.data = "AAAA".into();

    let mut bad_salt = sealed();
    bad_salt.salt = String::new();

    for (label, record) in [
        ("algorithm", bad_algorithm),
        ("base64", bad_base64),
        ("short data", short_data),
        ("empty salt", bad_salt),
    ] {
        assert_eq!(
            failure_text(&record, "right"),
            wrong_passphrase,
            "{label} failure leaked a distinct message"
        );
    }
    assert_eq!(wrong_passphrase, "decryption failed");
}
