//! Vault configuration, stored as plain JSON next to the session store.
//!
//! Nothing here is secret. Passphrases never live in the config file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::write_atomic;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// File name inside the data directory.
pub const CONFIG_FILE: &str = "vellum.json";

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL_HOURS: u32 = 24;

/// Default store key for the persisted session.
pub const DEFAULT_SESSION_KEY: &str = "secret-auth-state";

/// Filename suffixes that mark an encrypted document.
pub const DEFAULT_CONTENT_SUFFIXES: [&str; 3] = [".secret.md", ".secret.json", ".encrypted"];

/// Runtime configuration.
///
/// Persisted to `{data_dir}/vellum.json`. Every field has a default, so a
/// partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VaultConfig {
    /// Hours a session stays valid after creation or extension.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    /// Store key the session is persisted under.
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Suffixes stripped by slug extraction, checked in order.
    #[serde(default = "default_content_suffixes")]
    pub content_suffixes: Vec<String>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            session_key: default_session_key(),
            content_suffixes: default_content_suffixes(),
        }
    }
}

const fn default_session_ttl_hours() -> u32 {
    DEFAULT_SESSION_TTL_HOURS
}
fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.into()
}
fn default_content_suffixes() -> Vec<String> {
    DEFAULT_CONTENT_SUFFIXES.iter().map(|s| (*s).to_owned()).collect()
}

impl VaultConfig {
    /// Session lifetime in milliseconds.
    #[must_use]
    pub fn session_ttl_millis(&self) -> i64 {
        i64::from(self.session_ttl_hours).saturating_mul(MILLIS_PER_HOUR)
    }

    /// Load from `{data_dir}/vellum.json`.
    ///
    /// Falls back to [`Default::default()`] when the file is missing or
    /// unparsable.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        fs::read_to_string(&path).map_or_else(
            |_| Self::default(),
            |contents| {
                serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), "ignoring unparsable config: {e}");
                    Self::default()
                })
            },
        )
    }

    /// Persist to `{data_dir}/vellum.json` (write to a temp file, then rename).
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory is missing or the write fails.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_atomic(&data_dir.join(CONFIG_FILE), json.as_bytes())
    }
}

// ── Tests ──────────────────────────────────────────────────────────
