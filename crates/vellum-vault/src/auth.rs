//! Three-word passphrase login against an encrypted user directory.
//!
//! A login runs `decrypt directory → parse directory → match identifier`.
//! Every outcome is a [`VaultResult`]; nothing panics on hostile input.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vellum_crypto_core::{
    constant_time_compare, decrypt_data, normalize_identifier, normalize_passphrase,
    EncryptedData, SecretUsers,
};

use crate::clock::Clock;
use crate::error::{ErrorCode, VaultResult};
use crate::session::{AuthenticationState, SessionManager};
use crate::store::SessionStore;

/// A submitted login form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFormData {
    pub identifier: String,
    pub word1: String,
    pub word2: String,
    pub word3: String,
}

impl AuthFormData {
    /// The three words in order.
    #[must_use]
    pub fn words(&self) -> [&str; 3] {
        [&self.word1, &self.word2, &self.word3]
    }
}

/// Successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccess {
    /// Identifier exactly as submitted, not the directory key.
    pub user_identifier: String,
}

/// Accept `value` as a login form when `identifier`, `word1`, `word2` and
/// `word3` are all strings that are non-empty after trimming.
#[must_use]
pub fn validate_auth_form(value: &Value) -> Option<AuthFormData> {
    let field = |name: &str| -> Option<String> {
        value
            .get(name)?
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned)
    };
    Some(AuthFormData {
        identifier: field("identifier")?,
        word1: field("word1")?,
        word2: field("word2")?,
        word3: field("word3")?,
    })
}

/// Check `auth_data` against the directory sealed in `encrypted_users`.
///
/// Identifiers and words are compared trimmed and lowercased. The scan stops
/// at the first entry whose identifier matches, so entry position is
/// observable through timing even though each comparison is constant-time.
///
/// # Errors
///
/// - `DECRYPTION_FAILED` if the directory does not open with `master_password`
/// - `VALIDATION_ERROR` if the plaintext is not a valid user directory
/// - `USER_NOT_FOUND` if no identifier matches
/// - `INVALID_CREDENTIALS` if the identifier matches but the words do not
pub fn authenticate_user(
    encrypted_users: &EncryptedData,
    auth_data: &AuthFormData,
    master_password: &str,
) -> VaultResult<AuthSuccess> {
    let plaintext = decrypt_data(encrypted_users, master_password).map_err(|_| {
        tracing::debug!("user directory did not decrypt");
        ErrorCode::DecryptionFailed
    })?;

    let users = SecretUsers::from_json(&plaintext).ok_or_else(|| {
        tracing::debug!("user directory failed shape check");
        ErrorCode::ValidationError
    })?;

    let submitted_id = normalize_identifier(&auth_data.identifier);
    let submitted_words = normalize_passphrase(&auth_data.words());

    let mut passphrase_ok = None;
    for (identifier, words) in users.iter() {
        if constant_time_compare(&normalize_identifier(identifier), &submitted_id) {
            passphrase_ok = Some(constant_time_compare(
                &normalize_passphrase(words),
                &submitted_words,
            ));
            break;
        }
    }

    match passphrase_ok {
        None => {
            tracing::debug!("login rejected: unknown identifier");
            Err(ErrorCode::UserNotFound)
        }
        Some(false) => {
            tracing::debug!("login rejected: passphrase mismatch");
            Err(ErrorCode::InvalidCredentials)
        }
        Some(true) => Ok(AuthSuccess {
            user_identifier: auth_data.identifier.clone(),
        }),
    }
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

/// Login and logout over a [`SessionManager`].
#[derive(Debug)]
pub struct AuthService<S, C> {
    sessions: SessionManager<S, C>,
}

impl<S: SessionStore, C: Clock> AuthService<S, C> {
    #[must_use]
    pub const fn new(sessions: SessionManager<S, C>) -> Self {
        Self { sessions }
    }

    /// The session manager behind this service.
    pub const fn sessions(&self) -> &SessionManager<S, C> {
        &self.sessions
    }

    /// Authenticate and, on success, start a session.
    ///
    /// # Errors
    ///
    /// Any error from [`authenticate_user`]. No session is written on failure.
    pub fn login(
        &self,
        encrypted_users: &EncryptedData,
        form: &AuthFormData,
        master_password: &str,
    ) -> VaultResult<AuthenticationState> {
        let success = authenticate_user(encrypted_users, form, master_password)?;
        Ok(self.sessions.create_session(&success.user_identifier))
    }

    /// End the current session.
    pub fn logout(&self) {
        self.sessions.clear_session();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
