//! Zeroizing containers for key material and decrypted plaintext.
//!
//! - [`SecretBuffer`]: variable-length, backed by [`secrecy::SecretSlice`]
//! - [`SecretKey`]: fixed 256-bit key, zeroized on drop
//!
//! Both mask their contents in `Debug` output.

use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a derived symmetric key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

// ---------------------------------------------------------------------------
// SecretBuffer
// ---------------------------------------------------------------------------

/// Variable-length buffer for sensitive data, zeroized on drop.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
}

impl SecretBuffer {
    /// Copy `data` into a new zeroizing allocation.
    ///
    /// The caller should zeroize the source afterwards.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            inner: data.to_vec().into(),
        }
    }

    /// Expose the underlying bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Returns the number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interpret the buffer as UTF-8 and copy it out.
    ///
    /// Returns `None` when the bytes are not valid UTF-8.
    #[must_use]
    pub fn to_utf8_string(&self) -> Option<String> {
        std::str::from_utf8(self.expose()).ok().map(str::to_owned)
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// A derived 256-bit key.
///
/// There is no way to serialize or export it; the only consumer is an
/// [`AuthenticatedCipher`](crate::symmetric::AuthenticatedCipher).
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_LEN],
}

impl SecretKey {
    /// Take ownership of raw key bytes.
    #[must_use]
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub(crate) const fn expose(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}
