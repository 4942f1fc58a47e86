//! Edit shortcuts handled while the overlay window has focus.
//!
//! The window has no main menu, so standard Command chords have to be
//! routed to the first responder by hand.

/// Action performed for an in-window Command chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Copy,
    Paste,
    Cut,
    SelectAll,
    Quit,
}

impl EditAction {
    /// Responder selector name for edit actions. `None` for Quit, which goes
    /// to the application instead.
    pub fn selector_name(self) -> Option<&'static str> {
        match self {
            EditAction::Copy => Some("copy:"),
            EditAction::Paste => Some("paste:"),
            EditAction::Cut => Some("cut:"),
            EditAction::SelectAll => Some("selectAll:"),
            EditAction::Quit => None,
        }
    }
}

/// Map a key-down to an edit action. Only Command chords qualify; a bare
/// letter is ordinary typing and passes through.
pub fn edit_action_for(chars_ignoring_modifiers: &str, command_held: bool) -> Option<EditAction> {
    if !command_held {
        return None;
    }
    match chars_ignoring_modifiers.to_lowercase().as_str() {
        "c" => Some(EditAction::Copy),
        "v" => Some(EditAction::Paste),
        "x" => Some(EditAction::Cut),
        "a" => Some(EditAction::SelectAll),
        "q" => Some(EditAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_chords() {
        assert_eq!(edit_action_for("c", true), Some(EditAction::Copy));
        assert_eq!(edit_action_for("v", true), Some(EditAction::Paste));
        assert_eq!(edit_action_for("x", true), Some(EditAction::Cut));
        assert_eq!(edit_action_for("a", true), Some(EditAction::SelectAll));
        assert_eq!(edit_action_for("q", true), Some(EditAction::Quit));
    }

    #[test]
    fn test_bare_letters_pass_through() {
        for key in ["a", "c", "v", "x", "q"] {
            assert_eq!(edit_action_for(key, false), None);
        }
    }

    #[test]
    fn test_shifted_chord_still_matches() {
        assert_eq!(edit_action_for("A", true), Some(EditAction::SelectAll));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(edit_action_for("z", true), None);
        assert_eq!(edit_action_for("", true), None);
    }

    #[test]
    fn test_selector_names() {
        assert_eq!(EditAction::SelectAll.selector_name(), Some("selectAll:"));
        assert_eq!(EditAction::Quit.selector_name(), None);
    }
}
