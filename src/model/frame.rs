//! Window geometry and its preference-string encoding.
//!
//! The encoding matches `NSStringFromRect`: `{{x, y}, {width, height}}`.
//! Parsing is lenient about braces and spacing, like `NSRectFromString`.

use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

/// Rectangle in screen coordinates (origin bottom-left, AppKit convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WindowFrame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` × `height` frame centred on `screen`.
    pub fn centered_on(screen: &WindowFrame, width: f64, height: f64) -> Self {
        Self {
            x: screen.x + (screen.width - width) / 2.0,
            y: screen.y + (screen.height - height) / 2.0,
            width,
            height,
        }
    }

    /// Encode for the preference store.
    pub fn to_pref_string(&self) -> String {
        self.to_string()
    }

    /// Decode a preference string. Rejects anything that is not four finite
    /// numbers with a positive size.
    pub fn from_pref_string(s: &str) -> Result<Self, OverlayError> {
        s.parse()
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{{{}, {}}}, {{{}, {}}}}}",
            self.x, self.y, self.width, self.height
        )
    }
}

impl FromStr for WindowFrame {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || OverlayError::FrameParse(s.to_string());

        let numbers = s
            .split(|c: char| c == '{' || c == '}' || c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| tok.parse::<f64>().map_err(|_| bad()))
            .collect::<Result<Vec<f64>, _>>()?;

        let [x, y, width, height] = numbers[..] else {
            return Err(bad());
        };
        if !numbers.iter().all(|n| n.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(bad());
        }
        Ok(Self::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_appkit() {
        let f = WindowFrame::new(320.0, 240.0, 800.0, 600.0);
        assert_eq!(f.to_pref_string(), "{{320, 240}, {800, 600}}");
    }

    #[test]
    fn test_parse_fractional_and_negative() {
        let f: WindowFrame = "{{-1440, 12.5}, {640.25, 480}}".parse().unwrap();
        assert_eq!(f, WindowFrame::new(-1440.0, 12.5, 640.25, 480.0));
    }

    #[test]
    fn test_parse_without_outer_braces() {
        let f = WindowFrame::from_pref_string("{10, 20}, {300, 400}").unwrap();
        assert_eq!(f, WindowFrame::new(10.0, 20.0, 300.0, 400.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(WindowFrame::from_pref_string("").is_err());
        assert!(WindowFrame::from_pref_string("{{1, 2}, {3}}").is_err());
        assert!(WindowFrame::from_pref_string("{{a, b}, {c, d}}").is_err());
        assert!(WindowFrame::from_pref_string("{{1, 2}, {3, 4}, {5, 6}}").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_size() {
        assert!(WindowFrame::from_pref_string("{{0, 0}, {0, 0}}").is_err());
        assert!(WindowFrame::from_pref_string("{{0, 0}, {100, -5}}").is_err());
    }

    #[test]
    fn test_centered_on_screen() {
        let screen = WindowFrame::new(0.0, 0.0, 1440.0, 900.0);
        let f = WindowFrame::centered_on(&screen, 800.0, 600.0);
        assert_eq!(f, WindowFrame::new(320.0, 150.0, 800.0, 600.0));
    }
}
