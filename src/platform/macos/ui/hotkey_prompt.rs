//! Modal prompt shown while a new toggle hotkey is being captured.
//!
//! A translucent backdrop covers the whole content area; a dark rounded box
//! in its centre holds one label that first asks for the key combination
//! and then shows the result until the prompt is dismissed.

use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nsstring_id, NSAutoresizingMaskOptions, NSBoxType, NSPoint, NSRect,
    NSSize, NSTextAlignment, NSTitlePosition, NO, YES,
};

const BOX_WIDTH: f64 = 420.0;
const BOX_HEIGHT: f64 = 200.0;
const BOX_CORNER_RADIUS: f64 = 15.0;
const LABEL_INSET: f64 = 20.0;
const LABEL_FONT_SIZE: f64 = 16.0;

fn fill() -> NSAutoresizingMaskOptions {
    NSAutoresizingMaskOptions::ViewWidthSizable | NSAutoresizingMaskOptions::ViewHeightSizable
}

/// All four margins flexible: the box stays centred.
fn centred() -> NSAutoresizingMaskOptions {
    NSAutoresizingMaskOptions::ViewMinXMargin
        | NSAutoresizingMaskOptions::ViewMaxXMargin
        | NSAutoresizingMaskOptions::ViewMinYMargin
        | NSAutoresizingMaskOptions::ViewMaxYMargin
}

/// The prompt views currently attached to the window.
pub struct HotkeyPrompt {
    backdrop: id,
    label: id,
}

impl HotkeyPrompt {
    /// Cover `host` with the prompt showing `message`.
    ///
    /// # Safety
    /// `host` must be a valid NSView; main thread only.
    pub unsafe fn show(host: id, message: &str) -> Self {
        let bounds: NSRect = msg_send![host, bounds];

        let backdrop = custom_box(bounds, 0.5, 0.5, 0.0);
        let _: () = msg_send![backdrop, setAutoresizingMask: fill()];

        let box_frame = NSRect::new(
            NSPoint::new(
                (bounds.size.width - BOX_WIDTH) / 2.0,
                (bounds.size.height - BOX_HEIGHT) / 2.0,
            ),
            NSSize::new(BOX_WIDTH, BOX_HEIGHT),
        );
        let panel = custom_box(box_frame, 0.2, 0.9, BOX_CORNER_RADIUS);
        let _: () = msg_send![panel, setAutoresizingMask: centred()];
        let _: () = msg_send![backdrop, addSubview: panel];

        let label = message_label(NSRect::new(
            NSPoint::new(LABEL_INSET, LABEL_INSET),
            NSSize::new(BOX_WIDTH - 2.0 * LABEL_INSET, BOX_HEIGHT - 2.0 * LABEL_INSET),
        ));
        let _: () = msg_send![panel, addSubview: label];

        let _: () = msg_send![host, addSubview: backdrop];

        let prompt = Self { backdrop, label };
        prompt.set_message(message);
        prompt
    }

    /// Replace the label text.
    ///
    /// # Safety
    /// Main thread only.
    pub unsafe fn set_message(&self, message: &str) {
        let _: () = msg_send![self.label, setStringValue: nsstring_id(message)];
    }

    /// Detach the prompt from its host.
    ///
    /// # Safety
    /// Main thread only.
    pub unsafe fn remove(self) {
        let _: () = msg_send![self.backdrop, removeFromSuperview];
    }
}

/// NSBox drawn as a plain filled rectangle in a grey level.
unsafe fn custom_box(frame: NSRect, white: f64, alpha: f64, corner_radius: f64) -> id {
    let view: id = msg_send![get_class("NSBox"), alloc];
    let view: id = msg_send![view, initWithFrame: frame];
    let _: () = msg_send![view, setBoxType: NSBoxType::Custom];
    let _: () = msg_send![view, setTitlePosition: NSTitlePosition::NoTitle];
    let _: () = msg_send![view, setBorderWidth: 0.0f64];
    let _: () = msg_send![view, setCornerRadius: corner_radius];
    let fill: id = msg_send![get_class("NSColor"), colorWithWhite: white, alpha: alpha];
    let _: () = msg_send![view, setFillColor: fill];
    view
}

unsafe fn message_label(frame: NSRect) -> id {
    let label: id = msg_send![get_class("NSTextField"), alloc];
    let label: id = msg_send![label, initWithFrame: frame];
    let _: () = msg_send![label, setBezeled: NO];
    let _: () = msg_send![label, setDrawsBackground: NO];
    let _: () = msg_send![label, setEditable: NO];
    let _: () = msg_send![label, setSelectable: NO];
    let _: () = msg_send![label, setAlignment: NSTextAlignment::Center];
    let white: id = msg_send![get_class("NSColor"), whiteColor];
    let _: () = msg_send![label, setTextColor: white];
    let font: id = msg_send![get_class("NSFont"), systemFontOfSize: LABEL_FONT_SIZE];
    let _: () = msg_send![label, setFont: font];

    let cell: id = msg_send![label, cell];
    let _: () = msg_send![cell, setWraps: YES];
    let _: () = msg_send![cell, setUsesSingleLineMode: NO];
    label
}
