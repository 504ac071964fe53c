//! AES-256-GCM authenticated encryption.
//!
//! This module provides:
//! - [`AuthenticatedCipher`]: the sealing port used by the envelope format
//! - [`Aes256Gcm`]: the `ring` adapter (96-bit nonce, 128-bit tag)
//! - [`random_nonce`]: a fresh CSPRNG nonce
//!
//! Sealed output is `ciphertext || tag`, the layout WebCrypto produces, so
//! blobs sealed by a browser build open here and vice versa.

use crate::error::CryptoError;
use crate::memory::{SecretBuffer, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use ring::aead;
use zeroize::Zeroize;

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Seals and opens `ciphertext || tag` buffers under a derived key.
pub trait AuthenticatedCipher {
    /// Encrypt `plaintext`, returning `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encryption` if the underlying cipher fails.
    fn seal(
        &self,
        key: &SecretKey,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Verify and decrypt `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Decryption` on any failure: short input, tag
    /// mismatch, wrong key, wrong nonce.
    fn open(
        &self,
        key: &SecretKey,
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> Result<SecretBuffer, CryptoError>;
}

/// AES-256-GCM over `ring::aead`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aes256Gcm;

impl Aes256Gcm {
    fn key(key: &SecretKey) -> Result<aead::LessSafeKey, ()> {
        let unbound = aead::UnboundKey::new(&aead::AES_256_GCM, key.expose()).map_err(|_| ())?;
        Ok(aead::LessSafeKey::new(unbound))
    }
}

impl AuthenticatedCipher for Aes256Gcm {
    fn seal(
        &self,
        key: &SecretKey,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let key = Self::key(key)
            .map_err(|()| CryptoError::Encryption("failed to create AES-256-GCM key".into()))?;
        let nonce = aead::Nonce::assume_unique_for_key(*nonce);

        let mut in_out = Vec::with_capacity(plaintext.len().saturating_add(TAG_LEN));
        in_out.extend_from_slice(plaintext);
        if key
            .seal_in_place_append_tag(nonce, aead::Aad::empty(), &mut in_out)
            .is_err()
        {
            in_out.zeroize();
            return Err(CryptoError::Encryption(
                "AES-256-GCM encryption failed".into(),
            ));
        }
        Ok(in_out)
    }

    fn open(
        &self,
        key: &SecretKey,
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> Result<SecretBuffer, CryptoError> {
        if sealed.len() < TAG_LEN {
            return Err(CryptoError::Decryption);
        }
        let key = Self::key(key).map_err(|()| CryptoError::Decryption)?;
        let nonce = aead::Nonce::assume_unique_for_key(*nonce);

        let mut in_out = sealed.to_vec();
        let result = key
            .open_in_place(nonce, aead::Aad::empty(), &mut in_out)
            .map(|plaintext| SecretBuffer::new(plaintext))
            .map_err(|_| CryptoError::Decryption);
        in_out.zeroize();
        result
    }
}

/// Generate a random 96-bit nonce from `OsRng`.
///
/// # Errors
///
/// Returns `CryptoError::Encryption` if the CSPRNG fails.
pub fn random_nonce() -> Result<[u8; NONCE_LEN], CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::Encryption(format!("CSPRNG fill failed: {e}")))?;
    Ok(nonce)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
