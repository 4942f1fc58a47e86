//! JSON file holding the user's toggle hotkey.
//!
//! Stored as `{"flags": <modifier mask>, "key": <key code>}` in the log
//! directory. A missing file means the compiled-in default.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{OverlayError, Result};
use crate::model::{HotkeySpec, Modifiers};

/// On-disk record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
struct HotkeyRecord {
    flags: u64,
    key: i64,
}

impl TryFrom<HotkeyRecord> for HotkeySpec {
    type Error = OverlayError;

    fn try_from(record: HotkeyRecord) -> Result<Self> {
        if record.key < 0 {
            return Err(OverlayError::InvalidHotkey {
                flags: record.flags,
                key: record.key,
            });
        }
        Ok(HotkeySpec::new(Modifiers::from_raw(record.flags), record.key))
    }
}

/// Where a successful rebinding is written. The rebinding flow only needs
/// `save`, so tests can substitute a failing store.
pub trait HotkeyStore {
    fn save(&self, spec: &HotkeySpec) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HotkeyFile {
    path: PathBuf,
}

impl HotkeyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<HotkeySpec>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(OverlayError::io(&self.path, e)),
        };
        let record: HotkeyRecord =
            serde_json::from_str(&contents).map_err(|source| OverlayError::HotkeyParse {
                path: self.path.clone(),
                source,
            })?;
        HotkeySpec::try_from(record).map(Some)
    }

    /// Load at startup. Any failure is logged and the default is kept.
    pub fn load_or_default(&self) -> HotkeySpec {
        match self.load() {
            Ok(Some(spec)) => {
                info!("[Prefs] Loaded toggle hotkey {spec} from {}", self.path.display());
                spec
            }
            Ok(None) => HotkeySpec::default(),
            Err(e) => {
                error!("[Prefs] {e}; keeping default hotkey");
                HotkeySpec::default()
            }
        }
    }
}

impl HotkeyStore for HotkeyFile {
    fn save(&self, spec: &HotkeySpec) -> Result<()> {
        if spec.is_disabled() {
            return Err(OverlayError::InvalidHotkey {
                flags: spec.modifiers.bits(),
                key: spec.key_code,
            });
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| OverlayError::io(parent, e))?;
        }

        let record = HotkeyRecord {
            flags: spec.modifiers.bits(),
            key: spec.key_code,
        };
        let json = serde_json::to_string_pretty(&record).map_err(|source| {
            OverlayError::HotkeyParse {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write then rename so a crash never leaves a truncated record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| OverlayError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| OverlayError::io(&self.path, e))?;
        Ok(())
    }
}
