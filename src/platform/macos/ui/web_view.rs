//! WKWebView creation and provider loading.

use tracing::{info, warn};

use crate::error::{OverlayError, Result};
use crate::model::constants::CUSTOM_USER_AGENT;
use crate::model::Provider;
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, try_class, AnyObject, NSAutoresizingMaskOptions,
    NSRect, Retained, YES,
};

/// Configuration shared by every provider page: scripts may open windows,
/// which some sign-in flows need.
///
/// # Safety
/// WebKit must be loaded.
unsafe fn web_view_configuration() -> Result<Retained<AnyObject>> {
    let config_class = try_class("WKWebViewConfiguration")
        .ok_or_else(|| OverlayError::Window("WebKit unavailable".into()))?;
    let config: Option<Retained<AnyObject>> = msg_send![config_class, new];
    let config =
        config.ok_or_else(|| OverlayError::Window("WKWebViewConfiguration init failed".into()))?;

    let preferences: id = msg_send![&*config, preferences];
    let _: () = msg_send![preferences, setJavaScriptCanOpenWindowsAutomatically: YES];
    Ok(config)
}

/// Create a web view that fills `frame` and follows its superview's size.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn create_web_view(frame: NSRect) -> Result<id> {
    let web_view_class =
        try_class("WKWebView").ok_or_else(|| OverlayError::Window("WebKit unavailable".into()))?;
    // The web view copies the configuration; ours is released on return.
    let config = web_view_configuration()?;

    let web_view: id = msg_send![web_view_class, alloc];
    let web_view: id = msg_send![web_view, initWithFrame: frame, configuration: &*config];
    if web_view == nil {
        return Err(OverlayError::Window("WKWebView init failed".into()));
    }

    let _: () = msg_send![web_view, setCustomUserAgent: nsstring_id(CUSTOM_USER_AGENT)];
    let fill = NSAutoresizingMaskOptions::ViewWidthSizable
        | NSAutoresizingMaskOptions::ViewHeightSizable;
    let _: () = msg_send![web_view, setAutoresizingMask: fill];
    Ok(web_view)
}

/// Point the web view at `provider`.
///
/// # Safety
/// `web_view` must be a WKWebView; main thread only.
pub unsafe fn load_provider(web_view: id, provider: &Provider) {
    let url: id = msg_send![get_class("NSURL"), URLWithString: nsstring_id(provider.url)];
    if url == nil {
        warn!("[Provider] Invalid URL for {}: {}", provider.name, provider.url);
        return;
    }
    let request: id = msg_send![get_class("NSURLRequest"), requestWithURL: url];
    let _: id = msg_send![web_view, loadRequest: request];
    info!("[Provider] Loading {} ({})", provider.name, provider.url);
}
