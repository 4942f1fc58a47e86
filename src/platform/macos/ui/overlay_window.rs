//! The overlay window: a borderless floating panel with a drag strip, a
//! close button and the provider web view.
//!
//! ```text
//! ┌─[✕]──────── drag area (20px) ──────────┐
//! │                                         │
//! │               WKWebView                 │
//! │                                         │
//! └─────────────────────────────────────────┘
//! ```

use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
use objc2::sel;
use tracing::debug;

use crate::error::{OverlayError, Result};
use crate::model::constants::*;
use crate::model::{Provider, WindowFrame};
use crate::platform::macos::ffi::bridge::{
    declare_class, frame_to_rect, get_class, id, msg_send, nil, nsstring_id, rect_to_frame,
    NSApp, NSAutoresizingMaskOptions, NSBackingStoreType, NSBoxType, NSPoint, NSRect, NSSize,
    NSTitlePosition, NSWindowCollectionBehavior, NSWindowStyleMask, ObjectExt, NO, YES,
};
use crate::platform::macos::ui::web_view::{create_web_view, load_provider};
use crate::window::OverlaySurface;

/// NSFloatingWindowLevel
const FLOATING_WINDOW_LEVEL: isize = 3;

fn style_mask() -> NSWindowStyleMask {
    NSWindowStyleMask::Borderless | NSWindowStyleMask::Resizable
}

/// Visible on every Space, including next to full-screen apps.
fn collection_behavior() -> NSWindowCollectionBehavior {
    NSWindowCollectionBehavior::CanJoinAllSpaces
        | NSWindowCollectionBehavior::Stationary
        | NSWindowCollectionBehavior::FullScreenAuxiliary
}

fn window_class() -> Result<&'static AnyClass> {
    declare_class(c"LLMOverlayWindow", "NSWindow", |builder| unsafe {
        builder.add_ivar::<id>(c"_webView");
        builder.add_method(
            sel!(canBecomeKeyWindow),
            can_become_key as unsafe extern "C-unwind" fn(_, _) -> _,
        );
        builder.add_method(
            sel!(canBecomeMainWindow),
            can_become_key as unsafe extern "C-unwind" fn(_, _) -> _,
        );
    })
}

// Borderless windows refuse key status by default; the web view needs it.
unsafe extern "C-unwind" fn can_become_key(_this: &AnyObject, _cmd: Sel) -> Bool {
    YES
}

fn drag_area_class() -> Result<&'static AnyClass> {
    declare_class(c"LLMOverlayDragArea", "NSView", |builder| unsafe {
        register_drag_area_methods(builder);
    })
}

unsafe fn register_drag_area_methods(builder: &mut ClassBuilder) {
    builder.add_method(
        sel!(mouseDown:),
        drag_mouse_down as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(drawRect:),
        drag_draw_rect as unsafe extern "C-unwind" fn(_, _, _),
    );
}

unsafe extern "C-unwind" fn drag_mouse_down(this: &mut AnyObject, _cmd: Sel, event: id) {
    let window: id = msg_send![&*this, window];
    if window != nil {
        let _: () = msg_send![window, performWindowDragWithEvent: event];
    }
}

unsafe extern "C-unwind" fn drag_draw_rect(_this: &mut AnyObject, _cmd: Sel, dirty: NSRect) {
    let color: id = msg_send![get_class("NSColor"), darkGrayColor];
    let _: () = msg_send![color, setFill];
    let _: () = msg_send![get_class("NSBezierPath"), fillRect: dirty];
}

/// The real window behind [`OverlaySurface`].
///
/// Holds only the window pointer; the web view is kept in the window's
/// `_webView` ivar so a surface can be rebuilt from any delegate callback.
#[derive(Debug, Clone, Copy)]
pub struct MacSurface {
    window: id,
}

impl MacSurface {
    /// # Safety
    /// `window` must be an `LLMOverlayWindow` created by [`build_overlay_window`].
    pub unsafe fn from_window(window: id) -> Self {
        Self { window }
    }

    pub fn window(&self) -> id {
        self.window
    }

    pub fn web_view(&self) -> id {
        unsafe { *(*self.window).load_ivar::<id>("_webView") }
    }

    /// View that hosts the drag strip, the web view and the rebinding prompt.
    pub fn content_view(&self) -> id {
        unsafe {
            let container: id = msg_send![self.window, contentView];
            msg_send![container, contentView]
        }
    }

    pub fn load_provider(&self, provider: &Provider) {
        unsafe { load_provider(self.web_view(), provider) }
    }
}

impl OverlaySurface for MacSurface {
    fn is_visible(&self) -> bool {
        unsafe { msg_send![self.window, isVisible] }
    }

    fn frame(&self) -> WindowFrame {
        let rect: NSRect = unsafe { msg_send![self.window, frame] };
        rect_to_frame(rect)
    }

    fn set_frame(&mut self, frame: WindowFrame) {
        unsafe {
            let _: () = msg_send![self.window, setFrame: frame_to_rect(&frame), display: YES];
        }
    }

    fn present(&mut self) {
        unsafe {
            let _: () = msg_send![self.window, makeKeyAndOrderFront: nil];
            let _: Bool = msg_send![self.window, makeFirstResponder: self.web_view()];
            let _: () = msg_send![NSApp(), activateIgnoringOtherApps: YES];
        }
    }

    fn focus_content(&mut self) {
        unsafe {
            let _: Bool = msg_send![self.window, makeFirstResponder: self.web_view()];
        }
    }

    fn conceal(&mut self) {
        unsafe {
            let _: () = msg_send![self.window, orderOut: nil];
        }
    }
}

/// Build the window, hidden, at `frame`, showing `provider`.
///
/// `target` receives the close button action and the delegate callbacks.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn build_overlay_window(
    target: id,
    frame: WindowFrame,
    provider: &Provider,
) -> Result<MacSurface> {
    let cls = window_class()?;
    let window: id = msg_send![cls, alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: frame_to_rect(&frame),
        styleMask: style_mask(),
        backing: NSBackingStoreType::Buffered,
        defer: NO
    ];
    if window == nil {
        return Err(OverlayError::Window("overlay window init failed".into()));
    }
    (*window).store_ivar::<id>("_webView", nil);

    let clear: id = msg_send![get_class("NSColor"), clearColor];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setOpaque: NO];
    let _: () = msg_send![window, setBackgroundColor: clear];
    let _: () = msg_send![window, setHasShadow: YES];
    let _: () = msg_send![window, setLevel: FLOATING_WINDOW_LEVEL];
    let _: () = msg_send![window, setCollectionBehavior: collection_behavior()];
    let _: () = msg_send![window, setDelegate: target];

    let (width, height) = (frame.width, frame.height);
    let container = build_container(width, height);
    let _: () = msg_send![window, setContentView: container];
    let content: id = msg_send![container, contentView];

    let web_view = create_web_view(NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(width, height - DRAG_AREA_HEIGHT),
    ))?;
    let _: () = msg_send![content, addSubview: web_view];
    (*window).store_ivar::<id>("_webView", web_view);

    let drag_area = build_drag_area(width, height)?;
    let _: () = msg_send![content, addSubview: drag_area];
    let close_button = build_close_button(target);
    let _: () = msg_send![drag_area, addSubview: close_button];

    let surface = MacSurface::from_window(window);
    surface.load_provider(provider);
    debug!("[Window] Overlay window built at {frame}");
    Ok(surface)
}

/// Rounded white container; clips the web view to the corner radius.
unsafe fn build_container(width: f64, height: f64) -> id {
    let container: id = msg_send![get_class("NSBox"), alloc];
    let container: id = msg_send![container, initWithFrame: NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(width, height)
    )];
    let _: () = msg_send![container, setBoxType: NSBoxType::Custom];
    let _: () = msg_send![container, setTitlePosition: NSTitlePosition::NoTitle];
    let _: () = msg_send![container, setBorderWidth: 0.0f64];
    let _: () = msg_send![container, setContentViewMargins: NSSize::new(0.0, 0.0)];
    let _: () = msg_send![container, setCornerRadius: CONTENT_CORNER_RADIUS];
    let white: id = msg_send![get_class("NSColor"), whiteColor];
    let _: () = msg_send![container, setFillColor: white];

    let _: () = msg_send![container, setWantsLayer: YES];
    let layer: id = msg_send![container, layer];
    if layer != nil {
        let _: () = msg_send![layer, setCornerRadius: CONTENT_CORNER_RADIUS];
        let _: () = msg_send![layer, setMasksToBounds: YES];
    }
    container
}

unsafe fn build_drag_area(width: f64, height: f64) -> Result<id> {
    let cls = drag_area_class()?;
    let drag_area: id = msg_send![cls, alloc];
    let drag_area: id = msg_send![drag_area, initWithFrame: NSRect::new(
        NSPoint::new(0.0, height - DRAG_AREA_HEIGHT),
        NSSize::new(width, DRAG_AREA_HEIGHT)
    )];
    let pinned_top = NSAutoresizingMaskOptions::ViewWidthSizable
        | NSAutoresizingMaskOptions::ViewMinYMargin;
    let _: () = msg_send![drag_area, setAutoresizingMask: pinned_top];
    Ok(drag_area)
}

unsafe fn build_close_button(target: id) -> id {
    let inset = (DRAG_AREA_HEIGHT - CLOSE_BUTTON_SIZE) / 2.0;
    let button: id = msg_send![get_class("NSButton"), alloc];
    let button: id = msg_send![button, initWithFrame: NSRect::new(
        NSPoint::new(inset + 2.0, inset),
        NSSize::new(CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE)
    )];
    let _: () = msg_send![button, setTitle: nsstring_id("✕")];
    let _: () = msg_send![button, setBordered: NO];
    let font: id = msg_send![get_class("NSFont"), systemFontOfSize: 14.0f64];
    let _: () = msg_send![button, setFont: font];
    let _: () = msg_send![button, setTarget: target];
    let _: () = msg_send![button, setAction: sel!(hideWindow:)];
    button
}

/// Frame of the main screen, for centring the default window.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn main_screen_frame() -> Result<WindowFrame> {
    let screen: id = msg_send![get_class("NSScreen"), mainScreen];
    if screen == nil {
        return Err(OverlayError::Window("no main screen".into()));
    }
    let rect: NSRect = msg_send![screen, frame];
    Ok(rect_to_frame(rect))
}
