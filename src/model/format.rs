//! Human-readable key-combo labels, e.g. "Control + Option + K".

use super::hotkey::Modifiers;
use super::keymap::key_name;

/// Modifier display order. Independent of bit order.
const MODIFIER_ORDER: [(Modifiers, &str); 4] = [
    (Modifiers::SHIFT, "Shift"),
    (Modifiers::CONTROL, "Control"),
    (Modifiers::OPTION, "Option"),
    (Modifiers::COMMAND, "Command"),
];

/// Names of the modifiers present in `modifiers`, in display order.
pub fn modifier_names(modifiers: Modifiers) -> Vec<&'static str> {
    MODIFIER_ORDER
        .iter()
        .filter(|(flag, _)| modifiers.contains(*flag))
        .map(|(_, name)| *name)
        .collect()
}

/// Display name of a key. Falls back to the event's characters (upper-cased)
/// and then to `Keycode {n}`.
pub fn key_label(key_code: i64, chars_ignoring_modifiers: Option<&str>) -> String {
    if let Some(name) = key_name(key_code) {
        return name.to_string();
    }
    let printable: String = chars_ignoring_modifiers
        .unwrap_or_default()
        .chars()
        .filter(|c| is_printable(*c))
        .collect();
    if printable.is_empty() {
        format!("Keycode {key_code}")
    } else {
        printable.to_uppercase()
    }
}

/// AppKit reports function and navigation keys as private-use characters
/// in U+F700..=U+F8FF. Those have no glyph.
fn is_printable(c: char) -> bool {
    !c.is_control() && !c.is_whitespace() && !('\u{F700}'..='\u{F8FF}').contains(&c)
}

/// Format a combo as modifiers then key, joined with `" + "`.
pub fn format_combo(
    modifiers: Modifiers,
    key_code: i64,
    chars_ignoring_modifiers: Option<&str>,
) -> String {
    let key = key_label(key_code, chars_ignoring_modifiers);
    let mut parts: Vec<&str> = modifier_names(modifiers);
    parts.push(&key);
    parts.join(" + ")
}
