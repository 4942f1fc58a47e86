//! Global hotkey capture and rebinding (pure Rust).
//!
//! - [`state`]: the live hotkey and interceptor mode behind one mutex
//! - [`interceptor`]: per key-down decision used by the event tap
//! - [`rebinding`]: the "press a new combo" flow

pub mod interceptor;
pub mod rebinding;
pub mod state;

pub use interceptor::{decide, CapturedKey, TapDecision};
pub use rebinding::{RebindOutcome, RebindPhase, RebindingController};
pub use state::{HotkeySnapshot, InterceptorMode, SharedHotkeyState};
