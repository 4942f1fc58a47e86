//! Static virtual key code → display name table (ANSI layout).

/// Look up the display name of a virtual key code.
pub fn key_name(key_code: i64) -> Option<&'static str> {
    let name = match key_code {
        0 => "A",
        1 => "S",
        2 => "D",
        3 => "F",
        4 => "H",
        5 => "G",
        6 => "Z",
        7 => "X",
        8 => "C",
        9 => "V",
        11 => "B",
        12 => "Q",
        13 => "W",
        14 => "E",
        15 => "R",
        16 => "Y",
        17 => "T",
        18 => "1",
        19 => "2",
        20 => "3",
        21 => "4",
        22 => "6",
        23 => "5",
        24 => "=",
        25 => "9",
        26 => "7",
        27 => "-",
        28 => "8",
        29 => "0",
        30 => "]",
        31 => "O",
        32 => "U",
        33 => "[",
        34 => "I",
        35 => "P",
        36 => "Return",
        37 => "L",
        38 => "J",
        39 => "'",
        40 => "K",
        41 => ";",
        42 => "\\",
        43 => ",",
        44 => "/",
        45 => "N",
        46 => "M",
        47 => ".",
        48 => "Tab",
        49 => "Space",
        50 => "`",
        51 => "Delete",
        53 => "Escape",
        71 => "Clear",
        96 => "F5",
        97 => "F6",
        98 => "F7",
        99 => "F3",
        100 => "F8",
        101 => "F9",
        103 => "F11",
        109 => "F10",
        111 => "F12",
        115 => "Home",
        116 => "Page Up",
        118 => "F4",
        119 => "End",
        120 => "F2",
        121 => "Page Down",
        122 => "F1",
        123 => "Left Arrow",
        124 => "Right Arrow",
        125 => "Down Arrow",
        126 => "Up Arrow",
        _ => return None,
    };
    Some(name)
}

/// Every key code that has a table entry, ascending.
pub fn known_key_codes() -> impl Iterator<Item = i64> {
    (0..=127).filter(|code| key_name(*code).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_follow_ansi_layout() {
        assert_eq!(key_name(0), Some("A"));
        assert_eq!(key_name(40), Some("K"));
        assert_eq!(key_name(46), Some("M"));
    }

    #[test]
    fn test_gaps_are_unmapped() {
        assert_eq!(key_name(10), None);
        assert_eq!(key_name(52), None);
        assert_eq!(key_name(-1), None);
    }

    #[test]
    fn test_known_codes_cover_table() {
        assert_eq!(known_key_codes().count(), 73);
    }
}
