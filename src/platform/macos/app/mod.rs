//! Process-wide access to the app controller.
//!
//! The controller lives in a main-thread `thread_local`. AppKit callbacks
//! reach it through [`with_controller`]; a callback that arrives while it is
//! already borrowed is skipped and logged instead of panicking.

pub mod controller;

use std::cell::RefCell;

use tracing::{debug, warn};

pub use controller::AppController;

thread_local! {
    static CONTROLLER: RefCell<Option<AppController>> = const { RefCell::new(None) };
}

/// Hand the controller to the main thread's slot. Called once at launch.
pub fn install_controller(controller: AppController) {
    CONTROLLER.with(|slot| {
        *slot.borrow_mut() = Some(controller);
    });
}

/// Run `f` with the controller. `None` if it is not installed yet or is
/// already borrowed further up the stack.
pub fn with_controller<R>(f: impl FnOnce(&mut AppController) -> R) -> Option<R> {
    CONTROLLER.with(|slot| match slot.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            warn!("[Startup] App controller re-entered, skipping callback");
            None
        }
    })
}

/// Termination hook.
pub fn shutdown() {
    if with_controller(AppController::shutdown).is_none() {
        debug!("[Startup] No controller at shutdown");
    }
}
