//! Per-invocation state: data directory, config, session manager.

use std::path::{Path, PathBuf};

use vellum_vault::{ActiveSession, ErrorCode, FileStore, SessionManager, SystemClock, VaultConfig};

/// Subdirectory of the data dir used by the session store.
pub const SESSIONS_DIR: &str = "sessions";

pub struct AppContext {
    data_dir: PathBuf,
    config: VaultConfig,
}

impl AppContext {
    /// Read the config under `data_dir`, falling back to defaults.
    pub fn load(data_dir: PathBuf) -> Self {
        let config = VaultConfig::load(&data_dir);
        tracing::debug!(data_dir = %data_dir.display(), ?config, "loaded config");
        Self { data_dir, config }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn sessions(&self) -> SessionManager<FileStore, SystemClock> {
        SessionManager::new(
            FileStore::new(self.data_dir.join(SESSIONS_DIR)),
            SystemClock,
            &self.config,
        )
    }

    /// Content commands need a live session.
    pub fn require_session(&self) -> Result<ActiveSession, ErrorCode> {
        self.sessions()
            .get_session()
            .map_err(|_| ErrorCode::AccessDenied)
    }
}
