#![allow(unexpected_cfgs)] // Silence cfg warnings inside objc2 macros

//! Entry point: logging, crash boundary, event bus, then the platform app.

#[cfg(target_os = "macos")]
mod macos_main;

use std::process::ExitCode;

use tracing::{error, info};

use llm_overlay::paths::AppPaths;
use llm_overlay::{crash, events, logging};

fn main() -> ExitCode {
    let paths = AppPaths::resolve();
    if let Err(e) = paths.ensure_log_dir() {
        eprintln!("Cannot create log directory: {e}");
    }

    let guard = logging::init(&paths.log_dir);
    crash::install_panic_hook(paths.log_dir.clone());
    events::init_event_bus();
    info!("[Startup] Logs in {}", paths.log_dir.display());

    let code = run_platform(&paths);
    drop(guard);
    code
}

#[cfg(target_os = "macos")]
fn run_platform(paths: &AppPaths) -> ExitCode {
    use std::backtrace::Backtrace;
    use std::panic::{self, AssertUnwindSafe};

    match panic::catch_unwind(AssertUnwindSafe(|| macos_main::run(paths))) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("[Startup] Fatal: {e}");
            let backtrace = Backtrace::force_capture().to_string();
            match crash::write_crash_report(&paths.log_dir, "main", &e.to_string(), &backtrace) {
                Ok(path) => error!("[Startup] Crash report written to {}", path.display()),
                Err(write_err) => error!("[Startup] Could not write crash report: {write_err}"),
            }
            ExitCode::FAILURE
        }
        // The panic hook has already written the report.
        Err(payload) => panic::resume_unwind(payload),
    }
}

#[cfg(not(target_os = "macos"))]
fn run_platform(_paths: &AppPaths) -> ExitCode {
    error!("[Startup] This application only runs on macOS");
    ExitCode::FAILURE
}
