//! Window visibility controller.
//!
//! Show/hide/toggle for the single overlay window, with the frame persisted
//! on every hide and restored on every show. The window itself sits behind
//! [`OverlaySurface`] so these transitions run without AppKit in tests.

use tracing::debug;

use crate::model::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::model::WindowFrame;
use crate::storage::{load_frame, save_frame, PreferenceStore};

/// Operations the controller needs from the real window.
pub trait OverlaySurface {
    fn is_visible(&self) -> bool;
    fn frame(&self) -> WindowFrame;
    fn set_frame(&mut self, frame: WindowFrame);
    /// Order front, make key, focus the web view and activate the app.
    fn present(&mut self);
    /// Give the web view input focus without reordering.
    fn focus_content(&mut self);
    /// Order out. Never closes or releases the window.
    fn conceal(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Frame used at launch: the saved one, or a default-sized window centred
/// on `screen`.
pub fn initial_frame(prefs: &impl PreferenceStore, screen: &WindowFrame) -> WindowFrame {
    load_frame(prefs).unwrap_or_else(|| {
        WindowFrame::centered_on(screen, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    })
}

pub fn show(surface: &mut impl OverlaySurface, prefs: &impl PreferenceStore) {
    if surface.is_visible() {
        surface.focus_content();
        return;
    }
    if let Some(frame) = load_frame(prefs) {
        surface.set_frame(frame);
    }
    surface.present();
    debug!("[Window] Shown");
}

pub fn hide(surface: &mut impl OverlaySurface, prefs: &impl PreferenceStore) {
    if !surface.is_visible() {
        return;
    }
    save_frame(prefs, &surface.frame());
    surface.conceal();
    debug!("[Window] Hidden");
}

/// The action bound to the global hotkey.
pub fn toggle(surface: &mut impl OverlaySurface, prefs: &impl PreferenceStore) -> Visibility {
    if surface.is_visible() {
        hide(surface, prefs);
        Visibility::Hidden
    } else {
        show(surface, prefs);
        Visibility::Shown
    }
}

/// Move/resize notification: persist immediately.
pub fn persist_frame(surface: &impl OverlaySurface, prefs: &impl PreferenceStore) {
    save_frame(prefs, &surface.frame());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferences;

    #[derive(Default)]
    struct FakeWindow {
        visible: bool,
        frame: Option<WindowFrame>,
        presents: usize,
        focuses: usize,
    }

    impl OverlaySurface for FakeWindow {
        fn is_visible(&self) -> bool {
            self.visible
        }
        fn frame(&self) -> WindowFrame {
            self.frame.unwrap_or(WindowFrame::new(0.0, 0.0, 800.0, 600.0))
        }
        fn set_frame(&mut self, frame: WindowFrame) {
            self.frame = Some(frame);
        }
        fn present(&mut self) {
            self.visible = true;
            self.presents += 1;
        }
        fn focus_content(&mut self) {
            self.focuses += 1;
        }
        fn conceal(&mut self) {
            self.visible = false;
        }
    }

    #[test]
    fn test_show_when_visible_only_refocuses() {
        let prefs = MemoryPreferences::new();
        let mut win = FakeWindow {
            visible: true,
            ..Default::default()
        };
        show(&mut win, &prefs);
        assert_eq!(win.presents, 0);
        assert_eq!(win.focuses, 1);
        assert_eq!(prefs.write_count(), 0);
    }

    #[test]
    fn test_hide_when_hidden_writes_nothing() {
        let prefs = MemoryPreferences::new();
        let mut win = FakeWindow::default();
        hide(&mut win, &prefs);
        assert_eq!(prefs.write_count(), 0);
        assert!(!win.visible);
    }

    #[test]
    fn test_initial_frame_centres_without_saved() {
        let prefs = MemoryPreferences::new();
        let screen = WindowFrame::new(0.0, 0.0, 1000.0, 800.0);
        assert_eq!(
            initial_frame(&prefs, &screen),
            WindowFrame::new(100.0, 100.0, 800.0, 600.0)
        );
    }
}
