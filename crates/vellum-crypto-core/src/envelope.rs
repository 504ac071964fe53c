//! Passphrase-sealed envelope format.
//!
//! Wire format (JSON):
//!
//! ```json
//! {"data": "<base64>", "iv": "<base64>", "salt": "<base64>", "algorithm": "AES-GCM", "iterations": 100000}
//! ```
//!
//! `data` is `ciphertext || tag`. `iv` is 12 bytes, `salt` 16 bytes, all
//! standard padded base64.

use crate::error::CryptoError;
use crate::kdf::{KeyDerivation, Pbkdf2Sha256, PBKDF2_ITERATIONS, SALT_LEN};
use crate::memory::SecretBuffer;
use crate::symmetric::{random_nonce, Aes256Gcm, AuthenticatedCipher, NONCE_LEN};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// The only cipher identifier this format accepts.
pub const ALGORITHM: &str = "AES-GCM";

/// A passphrase-sealed blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// Base64 of `ciphertext || tag`.
    pub data: String,
    /// Base64 of the 12-byte nonce.
    pub iv: String,
    /// Base64 of the 16-byte PBKDF2 salt.
    pub salt: String,
    /// Cipher identifier, always [`ALGORITHM`] for records we produce.
    pub algorithm: String,
    /// PBKDF2 iteration count recorded at sealing time.
    pub iterations: u32,
}

impl EncryptedData {
    /// Structural check: every string field present and non-empty, iteration
    /// count non-zero. Says nothing about whether the record decrypts.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.data.is_empty()
            && !self.iv.is_empty()
            && !self.salt.is_empty()
            && !self.algorithm.is_empty()
            && self.iterations > 0
    }

    /// Parse the JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the input is not an object with
    /// the five expected fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the JSON wire format.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Seal `plaintext` under `passphrase` with PBKDF2-HMAC-SHA256 and AES-256-GCM.
///
/// A fresh salt and nonce are drawn from `OsRng` on every call.
///
/// # Errors
///
/// Returns `CryptoError::Encryption` if the CSPRNG or cipher fails.
pub fn encrypt_data(plaintext: &str, passphrase: &str) -> Result<EncryptedData, CryptoError> {
    seal_with(
        &Pbkdf2Sha256::default(),
        &Aes256Gcm,
        plaintext.as_bytes(),
        passphrase,
    )
}

/// Open a sealed record and return its UTF-8 plaintext.
///
/// # Errors
///
/// Returns `CryptoError::Decryption` for every failure: unsupported
/// algorithm, bad base64, wrong lengths, wrong passphrase, tampering,
/// non-UTF-8 plaintext.
pub fn decrypt_data(encrypted: &EncryptedData, passphrase: &str) -> Result<String, CryptoError> {
    let plaintext = open_with(&Pbkdf2Sha256::default(), &Aes256Gcm, encrypted, passphrase)?;
    plaintext
        .to_utf8_string()
        .ok_or(CryptoError::Decryption)
}

/// Seal with explicit adapters.
///
/// The recorded iteration count is always [`PBKDF2_ITERATIONS`].
///
/// # Errors
///
/// Returns `CryptoError::Encryption` if the CSPRNG, the KDF or the cipher fails.
pub fn seal_with<K: KeyDerivation, C: AuthenticatedCipher>(
    kdf: &K,
    cipher: &C,
    plaintext: &[u8],
    passphrase: &str,
) -> Result<EncryptedData, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| CryptoError::Encryption(format!("CSPRNG fill failed: {e}")))?;
    let nonce = random_nonce()?;

    let key = kdf
        .derive(passphrase.as_bytes(), &salt)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    let sealed = cipher.seal(&key, &nonce, plaintext)?;

    Ok(EncryptedData {
        data: data_encoding::BASE64.encode(&sealed),
        iv: data_encoding::BASE64.encode(&nonce),
        salt: data_encoding::BASE64.encode(&salt),
        algorithm: ALGORITHM.to_owned(),
        iterations: PBKDF2_ITERATIONS,
    })
}

/// Open with explicit adapters.
///
/// `encrypted.iterations` is not consulted; `kdf` decides the work factor.
///
/// # Errors
///
/// Returns `CryptoError::Decryption` for every failure.
pub fn open_with<K: KeyDerivation, C: AuthenticatedCipher>(
    kdf: &K,
    cipher: &C,
    encrypted: &EncryptedData,
    passphrase: &str,
) -> Result<SecretBuffer, CryptoError> {
    if encrypted.algorithm != ALGORITHM {
        return Err(CryptoError::Decryption);
    }

    let salt = decode_base64(&encrypted.salt)?;
    let iv = decode_base64(&encrypted.iv)?;
    let sealed = decode_base64(&encrypted.data)?;

    let nonce: [u8; NONCE_LEN] = iv.as_slice().try_into().map_err(|_| CryptoError::Decryption)?;

    let key = kdf
        .derive(passphrase.as_bytes(), &salt)
        .map_err(|_| CryptoError::Decryption)?;
    cipher.open(&key, &nonce, &sealed)
}

fn decode_base64(input: &str) -> Result<Vec<u8>, CryptoError> {
    data_encoding::BASE64
        .decode(input.as_bytes())
        .map_err(|_| CryptoError::Decryption)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
