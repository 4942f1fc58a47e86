//! Crash reports written to the log directory.
//!
//! Two entry points feed this: the panic hook, and the top-level boundary in
//! `main` for errors returned from the app's run loop.

use std::backtrace::Backtrace;
use std::fmt::Write as _;
use std::fs;
use std::panic;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{OverlayError, Result};

/// Render the report body.
pub fn format_crash_report(name: &str, timestamp: &str, message: &str, backtrace: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Crash Report for {name}");
    let _ = writeln!(out, "Timestamp: {timestamp}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Error: {message}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Backtrace:");
    let _ = writeln!(out, "{backtrace}");
    out
}

/// Write `crash_<name>_<YYYYmmdd_HHMMSS>.log` into `dir` and return its path.
pub fn write_crash_report(dir: &Path, name: &str, message: &str, backtrace: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| OverlayError::io(dir, e))?;

    let now = Local::now();
    let path = dir.join(format!("crash_{name}_{}.log", now.format("%Y%m%d_%H%M%S")));
    let body = format_crash_report(name, &now.to_rfc3339(), message, backtrace);

    fs::write(&path, body).map_err(|e| OverlayError::io(&path, e))?;
    Ok(path)
}

/// Chain a panic hook that records a crash report before the default output.
pub fn install_panic_hook(dir: PathBuf) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        let message = format!("panic{location}: {payload}");
        let backtrace = Backtrace::force_capture().to_string();

        match write_crash_report(&dir, "panic", &message, &backtrace) {
            Ok(path) => tracing::error!(crash_log = %path.display(), "{message}"),
            Err(e) => tracing::error!("{message} (crash report not written: {e})"),
        }
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let body = format_crash_report("main", "2024-01-02T03:04:05+00:00", "boom", "frame 0");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "Crash Report for main");
        assert_eq!(lines[1], "Timestamp: 2024-01-02T03:04:05+00:00");
        assert!(body.contains("Error: boom"));
        assert!(body.contains("Backtrace:\nframe 0"));
    }

    #[test]
    fn test_write_creates_named_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        let path = write_crash_report(&dir, "main", "window setup failed", "bt").unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("crash_main_"));
        assert!(file_name.ends_with(".log"));
        // crash_main_ + YYYYmmdd_HHMMSS + .log
        assert_eq!(file_name.len(), "crash_main_".len() + 15 + ".log".len());

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("window setup failed"));
    }
}
