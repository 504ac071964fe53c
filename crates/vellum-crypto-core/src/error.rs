//! Cryptographic error types for `vellum-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// Everything that can go wrong while opening an [`EncryptedData`] record
/// collapses into [`CryptoError::Decryption`]. Wrong passphrase, corrupted
/// ciphertext, bad base64 and unsupported algorithm are indistinguishable
/// to the caller.
///
/// [`EncryptedData`]: crate::envelope::EncryptedData
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key derivation failed (invalid iteration count, short salt).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Sealing failed (bad key length, CSPRNG failure).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Opening failed. Carries no detail on purpose.
    #[error("decryption failed")]
    Decryption,
}
