//! Status bar (menu bar) item with dropdown menu.
//!
//! - Toggle LLM Overlay App (⌘Space, shown only as a hint)
//! - Change Provider ▸ one item per provider, current one checked
//! - Set Toggle Hotkey…
//! - Quit LLM Overlay App

use objc2::sel;
use tracing::warn;

use crate::model::constants::*;
use crate::model::{Provider, PROVIDERS};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, nsstring_to_string, AnyObject, NSApp,
    NSEventModifierFlags, NSSize, Retained, Sel, NO, YES,
};

const STATE_ON: i64 = 1;
const STATE_OFF: i64 = 0;

/// The installed status item and its provider submenu.
pub struct StatusMenu {
    _item: Option<Retained<AnyObject>>,
    provider_menu: id,
}

impl StatusMenu {
    /// Move the checkmark to `name`.
    ///
    /// # Safety
    /// Main thread only.
    pub unsafe fn check_provider(&self, name: &str) {
        let count: isize = msg_send![self.provider_menu, numberOfItems];
        for i in 0..count {
            let item: id = msg_send![self.provider_menu, itemAtIndex: i];
            let title: id = msg_send![item, title];
            let is_current = nsstring_to_string(title).as_deref() == Some(name);
            let _: () = msg_send![item, setState: if is_current { STATE_ON } else { STATE_OFF }];
        }
    }
}

/// Install the status item. Actions go to `target`, except Quit, which goes
/// to the application.
///
/// # Safety
/// Must be called from the main thread after the application exists.
pub unsafe fn install_status_bar(target: id, current: &Provider) -> StatusMenu {
    let status_bar: id = msg_send![get_class("NSStatusBar"), systemStatusBar];
    // NSVariableStatusItemLength = -1.0
    let item: id = msg_send![status_bar, statusItemWithLength: -1.0f64];
    // statusItemWithLength: is autoreleased; the item vanishes without an owner.
    let retained = Retained::retain(item);

    let button: id = msg_send![item, button];
    if button != nil {
        set_status_icon(button);
    }

    let menu: id = msg_send![get_class("NSMenu"), new];
    let _: () = msg_send![menu, setAutoenablesItems: NO];

    let toggle = menu_item(
        &format!("Toggle {APP_TITLE}"),
        sel!(toggleWindow:),
        " ",
        target,
    );
    let _: () = msg_send![toggle, setKeyEquivalentModifierMask: NSEventModifierFlags::Command];
    let _: () = msg_send![menu, addItem: toggle];

    let provider_menu: id = msg_send![get_class("NSMenu"), new];
    let _: () = msg_send![provider_menu, setAutoenablesItems: NO];
    for provider in PROVIDERS.iter() {
        let entry = menu_item(provider.name, sel!(changeProvider:), "", target);
        let _: () = msg_send![provider_menu, addItem: entry];
    }
    let provider_root: id = msg_send![get_class("NSMenuItem"), new];
    let _: () = msg_send![provider_root, setTitle: nsstring_id("Change Provider")];
    let _: () = msg_send![provider_root, setSubmenu: provider_menu];
    let _: () = msg_send![menu, addItem: provider_root];

    let rebind = menu_item("Set Toggle Hotkey…", sel!(setToggleHotkey:), "", target);
    let _: () = msg_send![menu, addItem: rebind];

    let separator: id = msg_send![get_class("NSMenuItem"), separatorItem];
    let _: () = msg_send![menu, addItem: separator];

    let quit = menu_item(&format!("Quit {APP_TITLE}"), sel!(terminate:), "q", NSApp());
    let _: () = msg_send![menu, addItem: quit];

    let _: () = msg_send![item, setMenu: menu];

    let status = StatusMenu {
        _item: retained,
        provider_menu,
    };
    status.check_provider(current.name);
    status
}

unsafe fn menu_item(title: &str, action: Sel, key: &str, target: id) -> id {
    let item: id = msg_send![get_class("NSMenuItem"), alloc];
    let item: id = msg_send![
        item,
        initWithTitle: nsstring_id(title),
        action: action,
        keyEquivalent: nsstring_id(key)
    ];
    let _: () = msg_send![item, setTarget: target];
    item
}

/// Template icon from the bundle resources, or a text title without one.
unsafe fn set_status_icon(button: id) {
    let bundle: id = msg_send![get_class("NSBundle"), mainBundle];
    let resources: id = msg_send![bundle, resourcePath];
    let icon: id = if resources == nil {
        nil
    } else {
        let path: id = msg_send![
            resources,
            stringByAppendingPathComponent: nsstring_id(STATUS_ICON_FILE)
        ];
        let icon: id = msg_send![get_class("NSImage"), alloc];
        msg_send![icon, initWithContentsOfFile: path]
    };

    if icon != nil {
        let _: () = msg_send![icon, setSize: NSSize::new(18.0, 18.0)];
        let _: () = msg_send![icon, setTemplate: YES];
        let _: () = msg_send![button, setImage: icon];
    } else {
        warn!("[Startup] Status icon {STATUS_ICON_FILE} not found, using text title");
        let _: () = msg_send![button, setTitle: nsstring_id(STATUS_FALLBACK_TITLE)];
    }
}
