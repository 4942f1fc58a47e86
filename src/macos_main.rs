//! macOS launch sequence.
//!
//! Builds every piece on the main thread, installs the controller, shows the
//! window and hands control to `-[NSApplication run]`.

use tracing::{error, info, warn};

use llm_overlay::events;
use llm_overlay::hotkey::{RebindingController, SharedHotkeyState};
use llm_overlay::paths::AppPaths;
use llm_overlay::platform::macos::ffi::bridge::{
    autoreleasepool, msg_send, NSApp, NSApplicationActivationPolicy,
};
use llm_overlay::platform::macos::ffi::check_accessibility;
use llm_overlay::platform::macos::input::{
    install_edit_shortcut_monitor, install_termination_observer, install_wake_observers,
    EventTapHandle,
};
use llm_overlay::platform::macos::storage::UserDefaultsStore;
use llm_overlay::platform::macos::ui::{
    build_overlay_window, create_target, install_status_bar, main_screen_frame,
    start_dispatch_timer,
};
use llm_overlay::platform::macos::{install_controller, with_controller, AppController};
use llm_overlay::storage::{load_provider, HotkeyFile};
use llm_overlay::{window, Result};

/// Launch the app. Returns only if setup fails; a normal quit exits the
/// process from inside `terminate:`.
pub fn run(paths: &AppPaths) -> Result<()> {
    autoreleasepool(|_| unsafe { launch(paths) })
}

unsafe fn launch(paths: &AppPaths) -> Result<()> {
    if let Err(e) = check_accessibility() {
        warn!("[Startup] {e}; the global hotkey stays inactive until access is granted");
    }

    let app = NSApp();
    // No Dock icon, no app menu.
    let _: bool = msg_send![app, setActivationPolicy: NSApplicationActivationPolicy::Accessory];

    let prefs = UserDefaultsStore;
    let hotkey_file = HotkeyFile::new(paths.hotkey_file.clone());
    let hotkeys = SharedHotkeyState::new(hotkey_file.load_or_default());
    let provider = load_provider(&prefs);
    info!("[Startup] Hotkey {}, provider {}", hotkeys.spec(), provider.name);

    let target = create_target()?;
    let frame = window::initial_frame(&prefs, &main_screen_frame()?);
    let surface = build_overlay_window(target, frame, provider)?;
    let status_menu = install_status_bar(target, provider);

    let tap = match events::publisher() {
        Some(publisher) => EventTapHandle::install(hotkeys.clone(), publisher)
            .map_err(|e| error!("[Hotkey] {e}; continuing without the global hotkey"))
            .ok(),
        None => {
            error!("[Hotkey] Event bus missing, global hotkey disabled");
            None
        }
    };

    let _monitor = install_edit_shortcut_monitor();
    install_termination_observer();
    install_wake_observers();

    let mut rebinding = RebindingController::new(hotkeys.clone());
    rebinding.set_capture_available(tap.is_some());

    install_controller(AppController {
        rebinding,
        hotkeys,
        hotkey_file,
        prefs,
        surface,
        status_menu,
        provider,
        prompt: None,
        target,
        tap,
    });
    start_dispatch_timer(target);
    with_controller(AppController::show_window);

    info!("[Startup] Ready");
    let _: () = msg_send![app, run];
    Ok(())
}
