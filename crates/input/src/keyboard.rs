//! Keyboard source backed by crossterm key events.

use crossterm::event::KeyEventKind;

use crate::bindings::Bindings;
use crate::map::{code_for_key, reverse_lookup};
use crate::source::{HostEvent, InputSource, RawInput};
use crate::types::{Action, PhysicalCode, SourceKind};

/// Default keyboard layout.
pub const DEFAULT_KEYS: &[(&str, Action)] = &[
    ("A", Action::MoveLeft),
    ("D", Action::MoveRight),
    ("W", Action::MoveUp),
    ("S", Action::MoveDown),
    ("LEFT", Action::MoveLeft),
    ("RIGHT", Action::MoveRight),
    ("UP", Action::MoveUp),
    ("DOWN", Action::MoveDown),
    ("J", Action::Punch),
    ("K", Action::Kick),
    ("L", Action::Run),
    ("SPACE", Action::Jump),
    ("SHIFT_LEFT", Action::Crouch),
    // Terminals without key enhancement never report bare modifiers.
    ("C", Action::Crouch),
    ("ESC", Action::Menu),
    ("F1", Action::Debug),
];

/// Keyboard input.
///
/// Auto-repeat is reported as another press; de-duplicating repeats is left to
/// whoever consumes the actions.
#[derive(Debug, Clone, Default)]
pub struct KeyboardSource {
    attached: bool,
}

impl KeyboardSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for KeyboardSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Keyboard
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn on_event(&mut self, event: &HostEvent) -> Option<RawInput> {
        if !self.attached {
            return None;
        }
        let HostEvent::Key(key) = event else {
            return None;
        };
        let code = code_for_key(key.code)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(RawInput::press(code)),
            KeyEventKind::Release => Some(RawInput::release(code)),
        }
    }

    fn default_bindings(&self) -> Bindings {
        let mut bindings = Bindings::new();
        for &(name, action) in DEFAULT_KEYS {
            if let Some(code) = reverse_lookup(name) {
                bindings.bind(code, action);
            }
        }
        bindings
    }

    fn lookup(&self, name: &str) -> Option<PhysicalCode> {
        reverse_lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> HostEvent {
        HostEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn reports_only_while_attached() {
        let mut kb = KeyboardSource::new();
        let ev = key(KeyCode::Char('a'), KeyEventKind::Press);
        assert_eq!(kb.on_event(&ev), None);

        kb.attach();
        assert_eq!(kb.on_event(&ev), Some(RawInput::press(PhysicalCode(65))));

        kb.detach();
        assert_eq!(kb.on_event(&ev), None);
    }

    #[test]
    fn repeat_is_a_press_and_release_is_reported() {
        let mut kb = KeyboardSource::new();
        kb.attach();
        assert_eq!(
            kb.on_event(&key(KeyCode::Char(' '), KeyEventKind::Repeat)),
            Some(RawInput::press(PhysicalCode(32)))
        );
        assert_eq!(
            kb.on_event(&key(KeyCode::Char(' '), KeyEventKind::Release)),
            Some(RawInput::release(PhysicalCode(32)))
        );
    }

    #[test]
    fn default_bindings_cover_the_layout() {
        let kb = KeyboardSource::new();
        let b = kb.default_bindings();
        assert_eq!(b.len(), DEFAULT_KEYS.len());
        assert_eq!(b.get(PhysicalCode(32)), Some(Action::Jump));
        assert_eq!(b.get(kb.lookup("ESC").unwrap()), Some(Action::Menu));
        assert_eq!(b.get(kb.lookup("F1").unwrap()), Some(Action::Debug));
        assert_eq!(b.get(kb.lookup("C").unwrap()), Some(Action::Crouch));
    }

    #[test]
    fn every_action_has_a_non_modifier_key() {
        let b = KeyboardSource::new().default_bindings();
        let modifiers: Vec<PhysicalCode> = [
            "SHIFT_LEFT",
            "SHIFT_RIGHT",
            "CONTROL_LEFT",
            "CONTROL_RIGHT",
            "ALT_LEFT",
            "ALT_RIGHT",
        ]
        .iter()
        .filter_map(|name| reverse_lookup(name))
        .collect();
        for action in Action::ALL {
            let plain = b
                .codes_for(action)
                .into_iter()
                .filter(|code| !modifiers.contains(code))
                .count();
            assert!(plain > 0, "{} needs a non-modifier key", action.as_str());
        }
    }
}
