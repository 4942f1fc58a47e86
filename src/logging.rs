//! Logging setup: compact stderr output plus a plain-text log file.
//!
//! ```ignore
//! let _guard = llm_overlay::logging::init(&paths.log_dir);
//! tracing::info!("[Startup] ready");
//! ```

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::model::constants::LOG_FILE_NAME;

/// Keep alive for the whole program; dropping it flushes the file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. If the log file cannot be opened only stderr is used.
pub fn init(log_dir: &Path) -> LoggingGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = fs::create_dir_all(log_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    let (file_layer, file_guard) = match file {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("[LOGGING] Cannot open {}: {e}", log_path.display());
            (None, None)
        }
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match installed {
        Ok(()) => tracing::info!(log_path = %log_path.display(), "[Startup] Logging initialized"),
        Err(_) => tracing::debug!("[Startup] Logging already initialized"),
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let _a = init(tmp.path());
        let _b = init(tmp.path());
        assert!(tmp.path().join(LOG_FILE_NAME).exists());
    }
}
