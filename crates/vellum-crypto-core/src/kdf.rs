//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! This module provides:
//! - [`KeyDerivation`]: the port every passphrase-to-key adapter implements
//! - [`Pbkdf2Sha256`]: the PBKDF2-HMAC-SHA256 adapter
//! - [`derive_key`]: derive a 256-bit key at the global [`PBKDF2_ITERATIONS`]
//!
//! # Iteration policy
//!
//! Every blob in circulation was sealed with [`PBKDF2_ITERATIONS`]. Opening
//! always derives at that constant, whatever the record claims. Changing the
//! constant makes every previously issued blob undecryptable.

use crate::error::CryptoError;
use crate::memory::{SecretKey, KEY_LEN};
use zeroize::Zeroize;

/// Global PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length generated for every sealing operation.
pub const SALT_LEN: usize = 16;

/// Turns a passphrase and salt into a cipher key.
pub trait KeyDerivation {
    /// Derive a 256-bit key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyDerivation` if the adapter rejects its inputs.
    fn derive(&self, passphrase: &[u8], salt: &[u8]) -> Result<SecretKey, CryptoError>;
}

/// PBKDF2 with HMAC-SHA256 as the PRF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pbkdf2Sha256 {
    iterations: u32,
}

impl Pbkdf2Sha256 {
    /// Adapter running `iterations` rounds.
    #[must_use]
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Iteration count this adapter runs.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for Pbkdf2Sha256 {
    fn default() -> Self {
        Self::new(PBKDF2_ITERATIONS)
    }
}

impl KeyDerivation for Pbkdf2Sha256 {
    fn derive(&self, passphrase: &[u8], salt: &[u8]) -> Result<SecretKey, CryptoError> {
        if self.iterations == 0 {
            return Err(CryptoError::KeyDerivation(
                "iteration count must be non-zero".into(),
            ));
        }
        if salt.is_empty() {
            return Err(CryptoError::KeyDerivation("salt must not be empty".into()));
        }

        let mut output = [0u8; KEY_LEN];
        pbkdf2::pbkdf2_hmac::<sha2::Sha256>(passphrase, salt, self.iterations, &mut output);
        let key = SecretKey::new(output);
        output.zeroize();
        Ok(key)
    }
}

/// Derive a 256-bit key at the global iteration count.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if `salt` is empty.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<SecretKey, CryptoError> {
    Pbkdf2Sha256::default().derive(passphrase.as_bytes(), salt)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SALT: &[u8; SALT_LEN] = b"0123456789abcdef";

    /// Cheap adapter so unit tests don't pay for 100k rounds.
    const FAST: Pbkdf2Sha256 = Pbkdf2Sha256::new(10);

    #[test]
    fn derive_is_deterministic() {
        let a = FAST.derive(b"passphrase", TEST_SALT).unwrap();
        let b = FAST.derive(b"passphrase", TEST_SALT).unwrap();
        assert_eq!(a.expose(), b.expose());
    }

    #[test]
    fn different_salts_produce_different_keys() {
        let a = FAST.derive(b"passphrase", b"salt_aaaaaaaaaaa").unwrap();
        let b = FAST.derive(b"passphrase", b"salt_bbbbbbbbbbb").unwrap();
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn different_passphrases_produce_different_keys() {
        let a = FAST.derive(b"ocean mountain telescope", TEST_SALT).unwrap();
        let b = FAST.derive(b"ocean mountain telescopes", TEST_SALT).unwrap();
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn iteration_count_changes_the_key() {
        let a = Pbkdf2Sha256::new(10).derive(b"pw", TEST_SALT).unwrap();
        let b = Pbkdf2Sha256::new(11).derive(b"pw", TEST_SALT).unwrap();
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn zero_iterations_rejected() {
        let err = Pbkdf2Sha256::new(0)
            .derive(b"pw", TEST_SALT)
            .expect_err("zero iterations should fail");
        assert!(format!("{err}").contains("iteration count"));
    }

    #[test]
    fn empty_salt_rejected() {
        assert!(FAST.derive(b"pw", &[]).is_err());
    }

    #[test]
    fn default_uses_global_iterations() {
        assert_eq!(Pbkdf2Sha256::default().iterations(), PBKDF2_ITERATIONS);
        assert_eq!(PBKDF2_ITERATIONS, 100_000);
    }

    #[test]
    fn derive_key_matches_default_adapter() {
        let a = derive_key("pw", TEST_SALT).unwrap();
        let b = Pbkdf2Sha256::default().derive(b"pw", TEST_SALT).unwrap();
        assert_eq!(a.expose(), b.expose());
    }
}
