//! Key name table and mapping from terminal key events to physical codes.
//!
//! Codes follow DOM `keyCode` numbering so bindings read the same as they
//! would in a browser build (`A` = 65, `SPACE` = 32, `F1` = 112). Keys that
//! exist on both sides of the keyboard add `256 * location` (left = 1,
//! right = 2).

use crate::types::PhysicalCode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

const LOCATION_STRIDE: u16 = 256;

const NAMED_KEYS: &[(&str, u16)] = &[
    ("BACKSPACE", 8),
    ("TAB", 9),
    ("ENTER", 13),
    ("ESC", 27),
    ("SPACE", 32),
    ("PAGE_UP", 33),
    ("PAGE_DOWN", 34),
    ("END", 35),
    ("HOME", 36),
    ("LEFT", 37),
    ("UP", 38),
    ("RIGHT", 39),
    ("DOWN", 40),
    ("INSERT", 45),
    ("DELETE", 46),
    ("SHIFT_LEFT", 16 + LOCATION_STRIDE),
    ("SHIFT_RIGHT", 16 + 2 * LOCATION_STRIDE),
    ("CONTROL_LEFT", 17 + LOCATION_STRIDE),
    ("CONTROL_RIGHT", 17 + 2 * LOCATION_STRIDE),
    ("ALT_LEFT", 18 + LOCATION_STRIDE),
    ("ALT_RIGHT", 18 + 2 * LOCATION_STRIDE),
];

const F1: u16 = 112;

/// Physical code for a human-readable key name (case-insensitive).
///
/// # Examples
///
/// ```
/// use grandpa_input::map::reverse_lookup;
/// use grandpa_input::types::PhysicalCode;
///
/// assert_eq!(reverse_lookup("A"), Some(PhysicalCode(65)));
/// assert_eq!(reverse_lookup("space"), Some(PhysicalCode(32)));
/// assert_eq!(reverse_lookup("F1"), Some(PhysicalCode(112)));
/// assert_eq!(reverse_lookup("HYPER"), None);
/// ```
pub fn reverse_lookup(name: &str) -> Option<PhysicalCode> {
    let upper = name.trim().to_ascii_uppercase();

    let mut chars = upper.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            return Some(PhysicalCode(c as u16));
        }
    }

    if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u16>().ok()) {
        if (1..=12).contains(&n) {
            return Some(PhysicalCode(F1 + n - 1));
        }
    }

    NAMED_KEYS
        .iter()
        .find(|(n, _)| *n == upper)
        .map(|&(_, code)| PhysicalCode(code))
}

/// Human-readable name for a keyboard code, if it has one.
pub fn key_name(code: PhysicalCode) -> Option<String> {
    let c = code.0;
    if (u16::from(b'A')..=u16::from(b'Z')).contains(&c) || (u16::from(b'0')..=u16::from(b'9')).contains(&c) {
        return char::from_u32(u32::from(c)).map(String::from);
    }
    if (F1..F1 + 12).contains(&c) {
        return Some(format!("F{}", c - F1 + 1));
    }
    NAMED_KEYS
        .iter()
        .find(|&&(_, k)| k == c)
        .map(|&(n, _)| n.to_string())
}

/// Physical code of a terminal key.
pub fn code_for_key(code: KeyCode) -> Option<PhysicalCode> {
    match code {
        KeyCode::Char(' ') => reverse_lookup("SPACE"),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
            Some(PhysicalCode(c.to_ascii_uppercase() as u16))
        }
        KeyCode::Left => reverse_lookup("LEFT"),
        KeyCode::Right => reverse_lookup("RIGHT"),
        KeyCode::Up => reverse_lookup("UP"),
        KeyCode::Down => reverse_lookup("DOWN"),
        KeyCode::Esc => reverse_lookup("ESC"),
        KeyCode::Enter => reverse_lookup("ENTER"),
        KeyCode::Tab => reverse_lookup("TAB"),
        KeyCode::Backspace => reverse_lookup("BACKSPACE"),
        KeyCode::Home => reverse_lookup("HOME"),
        KeyCode::End => reverse_lookup("END"),
        KeyCode::PageUp => reverse_lookup("PAGE_UP"),
        KeyCode::PageDown => reverse_lookup("PAGE_DOWN"),
        KeyCode::Insert => reverse_lookup("INSERT"),
        KeyCode::Delete => reverse_lookup("DELETE"),
        KeyCode::F(n) if (1..=12).contains(&n) => Some(PhysicalCode(F1 + u16::from(n) - 1)),
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftShift => reverse_lookup("SHIFT_LEFT"),
            ModifierKeyCode::RightShift => reverse_lookup("SHIFT_RIGHT"),
            ModifierKeyCode::LeftControl => reverse_lookup("CONTROL_LEFT"),
            ModifierKeyCode::RightControl => reverse_lookup("CONTROL_RIGHT"),
            ModifierKeyCode::LeftAlt => reverse_lookup("ALT_LEFT"),
            ModifierKeyCode::RightAlt => reverse_lookup("ALT_RIGHT"),
            _ => None,
        },
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
