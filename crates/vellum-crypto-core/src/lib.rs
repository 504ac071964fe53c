//! `vellum-crypto-core`: Encryption primitives for the Vellum secret vault.
//!
//! Pure and synchronous: zero I/O, zero async, zero logging. Every call owns
//! its key material and buffers, so calls are safe to run in parallel.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod kdf;
pub mod symmetric;

pub mod envelope;

pub mod compare;
pub mod passphrase;

pub use compare::constant_time_compare;
pub use envelope::{decrypt_data, encrypt_data, open_with, seal_with, EncryptedData, ALGORITHM};
pub use error::CryptoError;
pub use kdf::{derive_key, KeyDerivation, Pbkdf2Sha256, PBKDF2_ITERATIONS, SALT_LEN};
pub use memory::{SecretBuffer, SecretKey, KEY_LEN};
pub use passphrase::{
    is_valid_passphrase, is_valid_secret_users, normalize_identifier, normalize_passphrase,
    SecretUsers, PASSPHRASE_WORD_COUNT,
};
pub use symmetric::{random_nonce, Aes256Gcm, AuthenticatedCipher, NONCE_LEN, TAG_LEN};
