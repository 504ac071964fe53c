//! Error codes for `vellum-vault`.
//!
//! [`ErrorCode`] is the only error that crosses a public entry point. Outer
//! layers render a fixed message per code and never see internals.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Closed set of failure codes. The serialized strings are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Identifier matched but the passphrase did not.
    InvalidCredentials,
    /// No directory entry matched the identifier.
    UserNotFound,
    /// No live session.
    SessionExpired,
    /// A blob could not be opened (wrong passphrase or corrupted data).
    DecryptionFailed,
    /// Decrypted or persisted data failed its shape check.
    ValidationError,
    /// Requested document does not exist.
    ContentNotFound,
    /// An encrypted record is structurally malformed.
    InvalidFormat,
    /// Caller lacks a valid session for the requested content.
    AccessDenied,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::InvalidCredentials,
        Self::UserNotFound,
        Self::SessionExpired,
        Self::DecryptionFailed,
        Self::ValidationError,
        Self::ContentNotFound,
        Self::InvalidFormat,
        Self::AccessDenied,
    ];

    /// Stable wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::DecryptionFailed => "DECRYPTION_FAILED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ContentNotFound => "CONTENT_NOT_FOUND",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::AccessDenied => "ACCESS_DENIED",
        }
    }

    /// Human-facing message.
    ///
    /// `UserNotFound` and `InvalidCredentials` render identically so a login
    /// form cannot be used to enumerate identifiers.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InvalidCredentials | Self::UserNotFound => {
                "Invalid credentials. Please check your identifier and passphrase."
            }
            Self::SessionExpired => "Your session has expired. Please sign in again.",
            Self::DecryptionFailed => "Unable to decrypt this content.",
            Self::ValidationError => "The submitted data is invalid.",
            Self::ContentNotFound => "The requested content could not be found.",
            Self::InvalidFormat => "The content is not in a recognized format.",
            Self::AccessDenied => "You do not have access to this content.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ErrorCode {}

/// Result alias for vault entry points.
pub type VaultResult<T> = Result<T, ErrorCode>;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Tagged failure body: `{"success": false, "error": "<CODE>", "message": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// The failure code.
    pub error: ErrorCode,
    /// [`ErrorCode::user_message`] for `error`.
    pub message: String,
}

impl From<ErrorCode> for ErrorResponse {
    fn from(code: ErrorCode) -> Self {
        Self {
            success: false,
            error: code,
            message: code.user_message().to_owned(),
        }
    }
}

/// Render a code as an [`ErrorResponse`] JSON string.
#[must_use]
pub fn err_json(code: ErrorCode) -> String {
    serde_json::to_string(&ErrorResponse::from(code)).unwrap_or_else(|_| {
        format!(r#"{{"success":false,"error":"{}"}}"#, code.as_str())
    })
}

// ---------------------------------------------------------------------------
// Internal errors
// ---------------------------------------------------------------------------

/// Session store failures. Logged, never surfaced through [`ErrorCode`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// Key cannot be mapped to a storage location.
    #[error("invalid store key: {0}")]
    InvalidKey(String),
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
