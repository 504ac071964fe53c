//! `vellum-vault`: Authentication, sessions and secret content for Vellum.
//!
//! Builds on `vellum-crypto-core` and adds everything with state or I/O:
//! the session store, configuration, login against an encrypted user
//! directory, and document decoding. Public entry points return
//! [`VaultResult`]; the [`ErrorCode`] is the only failure detail exposed.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod clock;
pub mod config;
pub mod error;
pub mod store;

pub mod auth;
pub mod session;

pub mod content;
pub mod frontmatter;
pub mod sanitize;

pub use auth::{authenticate_user, validate_auth_form, AuthFormData, AuthService, AuthSuccess};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VaultConfig;
pub use content::{
    decrypt_secret_content, extract_content_metadata, extract_slug_from_filename,
    extract_slug_with, parse_encrypted_data, process_content_list, validate_secret_content,
    EncryptedContentItem, SecretContent, SecretContentMeta,
};
pub use error::{err_json, ErrorCode, ErrorResponse, StoreError, VaultResult};
pub use sanitize::sanitize_content;
pub use session::{ActiveSession, AuthenticationState, SessionManager};
pub use store::{FileStore, MemoryStore, SessionStore};
pub use vellum_crypto_core::EncryptedData;
