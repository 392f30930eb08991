//! Persisted session file (`auth-storage.json`).
//!
//! The file survives restarts and holds the bearer token plus the signed-in
//! user. It is written with `0600` permissions inside a `0700` directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uni_config::SessionConfig;
use uni_core::session::SessionUser;

use crate::error::AuthError;

const STORAGE_FILE_NAME: &str = "auth-storage.json";

/// Contents of the session file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// File-backed store for [`PersistedSession`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store rooted at `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE_NAME),
        }
    }

    /// Store at the configured location.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if no storage directory can be resolved.
    pub fn from_config(config: &SessionConfig) -> Result<Self, AuthError> {
        config.storage_dir().map(Self::in_dir).ok_or_else(|| {
            AuthError::SessionStoreError(
                "data directory not found: set session.storage_dir".into(),
            )
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session. A missing, empty, or corrupt file reads as
    /// no session.
    #[must_use]
    pub fn load(&self) -> Option<PersistedSession> {
        let content = fs::read_to_string(&self.path).ok()?;
        if content.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "ignoring unreadable session file");
                None
            }
        }
    }

    /// Write the session file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the file cannot be written.
    pub fn save(&self, session: &PersistedSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SessionStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::SessionStoreError(format!("encode session: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            AuthError::SessionStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    /// Remove the session file if present.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStoreError` if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::SessionStoreError(format!("failed to delete {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uni_core::enums::UserRole;

    fn sample() -> PersistedSession {
        PersistedSession {
            token: Some("jwt-abc".into()),
            user: Some(SessionUser::new("admin@uni.edu", UserRole::Admin, Some("Admin".into()))),
        }
    }

    #[test]
    fn store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::in_dir(tmp.path().join("nested"));

        store.save(&sample()).expect("save");
        assert!(store.path().ends_with("auth-storage.json"));
        assert_eq!(store.load(), Some(sample()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.path())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "session file should be 0600");
        }

        store.delete().expect("delete");
        assert!(!store.path().exists());
        assert_eq!(store.load(), None);
        store.delete().expect("deleting twice is fine");
    }

    #[test]
    fn whitespace_and_garbage_read_as_absent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::in_dir(tmp.path());

        fs::write(store.path(), "   \n ").expect("write");
        assert_eq!(store.load(), None);

        fs::write(store.path(), "{not json").expect("write");
        assert_eq!(store.load(), None);
    }
}
