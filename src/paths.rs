//! Filesystem locations used by the app.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OverlayError, Result};
use crate::model::constants::{HOTKEY_FILE_NAME, LOG_DIR_NAME, LOG_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Holds the log file, crash reports and the hotkey record.
    pub log_dir: PathBuf,
    pub hotkey_file: PathBuf,
}

impl AppPaths {
    /// `~/Library/Logs/macos-llm-overlay`, or a temp-dir equivalent when
    /// there is no home directory.
    pub fn resolve() -> Self {
        let base = dirs::home_dir()
            .map(|home| home.join("Library").join("Logs"))
            .unwrap_or_else(std::env::temp_dir);
        Self::in_dir(base.join(LOG_DIR_NAME))
    }

    /// Same layout rooted at `log_dir`.
    pub fn in_dir(log_dir: impl Into<PathBuf>) -> Self {
        let log_dir = log_dir.into();
        Self {
            hotkey_file: log_dir.join(HOTKEY_FILE_NAME),
            log_dir,
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    pub fn ensure_log_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.log_dir).map_err(|e| OverlayError::io(&self.log_dir, e))?;
        Ok(&self.log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_layout() {
        let paths = AppPaths::in_dir("/var/tmp/overlay");
        assert_eq!(paths.hotkey_file, Path::new("/var/tmp/overlay/custom_toggle.json"));
        assert_eq!(paths.log_file(), Path::new("/var/tmp/overlay/llm-overlay.log"));
    }

    #[test]
    fn test_resolve_ends_with_app_dir() {
        let paths = AppPaths::resolve();
        assert!(paths.log_dir.ends_with(LOG_DIR_NAME));
    }

    #[test]
    fn test_ensure_log_dir_creates_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = AppPaths::in_dir(tmp.path().join("a").join("b"));
        paths.ensure_log_dir().unwrap();
        assert!(paths.log_dir.is_dir());
    }
}
