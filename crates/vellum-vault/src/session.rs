//! Session lifecycle: create, validate, extend, clear.
//!
//! The session is a small JSON record under one fixed store key. Expiry is
//! checked lazily on every read; there is no background timer, so an
//! expired record stays in the store until the next [`SessionManager::get_session`].

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::VaultConfig;
use crate::error::{ErrorCode, VaultResult};
use crate::store::SessionStore;

/// Persisted session record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationState {
    /// `false` marks a dead record.
    pub is_authenticated: bool,
    /// Identifier as the user typed it at login.
    pub user_identifier: String,
    /// Expiry in epoch milliseconds.
    pub session_expiry: i64,
}

impl AuthenticationState {
    /// `true` while authenticated and `now` is strictly before expiry.
    #[must_use]
    pub const fn is_live_at(&self, now: i64) -> bool {
        self.is_authenticated && self.session_expiry > now
    }
}

/// A session that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveSession {
    /// Identifier as submitted at login.
    pub user_identifier: String,
    /// Expiry in epoch milliseconds.
    pub expires_at: i64,
}

/// Owns the persisted session.
#[derive(Debug)]
pub struct SessionManager<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
    ttl_millis: i64,
}

impl<S: SessionStore> SessionManager<S, SystemClock> {
    /// Manager over `store` with wall-clock time and default config.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self::new(store, SystemClock, &VaultConfig::default())
    }
}

impl<S: SessionStore, C: Clock> SessionManager<S, C> {
    /// Manager over `store`, reading time from `clock`.
    #[must_use]
    pub fn new(store: S, clock: C, config: &VaultConfig) -> Self {
        Self {
            store,
            clock,
            key: config.session_key.clone(),
            ttl_millis: config.session_ttl_millis(),
        }
    }

    /// Underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Start a session for `user_identifier`, expiring one TTL from now.
    ///
    /// A failed write is logged and ignored: the returned state is still the
    /// live session for this process.
    pub fn create_session(&self, user_identifier: &str) -> AuthenticationState {
        let state = AuthenticationState {
            is_authenticated: true,
            user_identifier: user_identifier.to_owned(),
            session_expiry: self.clock.now_millis().saturating_add(self.ttl_millis),
        };
        if let Err(e) = self.persist(&state) {
            tracing::warn!("failed to persist session: {e}");
        } else {
            tracing::info!(expires_at = state.session_expiry, "session created");
        }
        state
    }

    /// Validate the stored session.
    ///
    /// # Errors
    ///
    /// - `SESSION_EXPIRED` when there is no record, it is marked
    ///   unauthenticated, or its expiry has passed
    /// - `VALIDATION_ERROR` when the record is not a well-formed session
    ///
    /// Every failure except "no record" also clears the store.
    pub fn get_session(&self) -> VaultResult<ActiveSession> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(ErrorCode::SessionExpired),
            Err(e) => {
                tracing::warn!("failed to read session: {e}");
                self.clear_session();
                return Err(ErrorCode::SessionExpired);
            }
        };

        let Ok(state) = serde_json::from_str::<AuthenticationState>(&raw) else {
            tracing::debug!("discarding malformed session record");
            self.clear_session();
            return Err(ErrorCode::ValidationError);
        };

        if !state.is_live_at(self.clock.now_millis()) {
            tracing::debug!("session expired");
            self.clear_session();
            return Err(ErrorCode::SessionExpired);
        }

        Ok(ActiveSession {
            user_identifier: state.user_identifier,
            expires_at: state.session_expiry,
        })
    }

    /// Push the expiry of a valid session to one TTL from now.
    ///
    /// Returns `false` when there is no valid session or the write fails.
    pub fn extend_session(&self) -> bool {
        let Ok(active) = self.get_session() else {
            return false;
        };
        let state = AuthenticationState {
            is_authenticated: true,
            user_identifier: active.user_identifier,
            session_expiry: self.clock.now_millis().saturating_add(self.ttl_millis),
        };
        match self.persist(&state) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to extend session: {e}");
                false
            }
        }
    }

    /// Remove the stored session. Idempotent; failures are logged.
    pub fn clear_session(&self) {
        match self.store.remove(&self.key) {
            Ok(()) => tracing::debug!("session cleared"),
            Err(e) => tracing::warn!("failed to clear session: {e}"),
        }
    }

    /// `true` when [`get_session`](Self::get_session) succeeds.
    pub fn is_authenticated(&self) -> bool {
        self.get_session().is_ok()
    }

    /// Identifier of the valid session, if any.
    pub fn get_current_user(&self) -> Option<String> {
        self.get_session().ok().map(|s| s.user_identifier)
    }

    fn persist(&self, state: &AuthenticationState) -> Result<(), crate::error::StoreError> {
        let json = serde_json::to_string(state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.store.set(&self.key, &json)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
