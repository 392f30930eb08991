//! Where the persisted session lives.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory holding `auth-storage.json`. Empty means
    /// `<data_dir>/unidash`.
    #[serde(default)]
    pub storage_dir: String,
}

impl SessionConfig {
    /// Resolved storage directory, `None` when no data dir can be found.
    #[must_use]
    pub fn storage_dir(&self) -> Option<PathBuf> {
        if self.storage_dir.is_empty() {
            dirs::data_dir().map(|dir| dir.join("unidash"))
        } else {
            Some(PathBuf::from(&self.storage_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = SessionConfig {
            storage_dir: "/tmp/unidash-test".into(),
        };
        assert_eq!(config.storage_dir(), Some(PathBuf::from("/tmp/unidash-test")));
    }
}
