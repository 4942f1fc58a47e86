//! Error types shared by the core and the macOS layer.

use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Hotkey file '{}' is not valid JSON: {source}", path.display())]
    HotkeyParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Hotkey record flags={flags} key={key} is not a usable hotkey")]
    InvalidHotkey { flags: u64, key: i64 },

    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("Cannot parse window frame from '{0}'")]
    FrameParse(String),

    #[error("Event tap installation failed: {0}")]
    TapInstall(String),

    #[error("Accessibility permission not granted")]
    PermissionDenied,

    #[error("Window setup failed: {0}")]
    Window(String),

    #[error("A hotkey rebinding is already in progress")]
    RebindBusy,

    #[error("No event tap is running, so a new hotkey cannot be captured")]
    CaptureUnavailable,
}

impl OverlayError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Only window/menu construction failures stop the app. Everything else
    /// degrades a feature and keeps running.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Window(_))
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;

/// Fail-soft helper: log the error with the caller's location and continue.
pub trait ResultExt<T> {
    fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                error!(
                    file = caller.file(),
                    line = caller.line(),
                    "{err}"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_window_errors_are_fatal() {
        assert!(OverlayError::Window("no screen".into()).is_fatal());
        assert!(!OverlayError::PermissionDenied.is_fatal());
        assert!(!OverlayError::TapInstall("denied".into()).is_fatal());
        assert!(!OverlayError::RebindBusy.is_fatal());
        assert!(!OverlayError::CaptureUnavailable.is_fatal());
    }

    #[test]
    fn test_io_message_includes_path() {
        let err = OverlayError::io(
            "/tmp/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x.json"));
        assert!(msg.contains("nope"));
    }

    #[test]
    fn test_log_err_maps_to_option() {
        let ok: std::result::Result<u8, OverlayError> = Ok(3);
        assert_eq!(ok.log_err(), Some(3));
        let err: std::result::Result<u8, OverlayError> = Err(OverlayError::RebindBusy);
        assert_eq!(err.log_err(), None);
    }
}
