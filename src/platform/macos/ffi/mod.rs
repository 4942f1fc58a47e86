//! Raw bindings: objc2 helpers, CoreFoundation, CoreGraphics event taps and
//! the Accessibility trust check.

pub mod accessibility;
pub mod bridge;
pub mod corefoundation;
pub mod event_tap;

pub use accessibility::{check_accessibility, is_process_trusted};

// WKWebView is looked up by name at runtime; this only pulls the framework in.
#[link(name = "WebKit", kind = "framework")]
extern "C" {}
