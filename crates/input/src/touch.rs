//! Touch source: rectangular on-screen zones acting as buttons.

use std::collections::HashMap;

use crate::bindings::Bindings;
use crate::source::{HostEvent, InputSource, RawInput, TouchPhase};
use crate::types::{Action, PhysicalCode, SourceKind};

/// Axis-aligned rectangle in normalized viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// A named touch button.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchZone {
    pub name: String,
    pub code: PhysicalCode,
    pub rect: Rect,
}

/// Default layout: d-pad bottom left, action buttons bottom right, menu top right.
const DEFAULT_ZONES: &[(&str, Rect, Action)] = &[
    ("DPAD_LEFT", Rect::new(0.00, 0.65, 0.08, 0.15), Action::MoveLeft),
    ("DPAD_RIGHT", Rect::new(0.16, 0.65, 0.08, 0.15), Action::MoveRight),
    ("DPAD_UP", Rect::new(0.08, 0.50, 0.08, 0.15), Action::MoveUp),
    ("DPAD_DOWN", Rect::new(0.08, 0.80, 0.08, 0.15), Action::MoveDown),
    ("RUN", Rect::new(0.00, 0.85, 0.08, 0.15), Action::Run),
    ("PUNCH", Rect::new(0.70, 0.75, 0.15, 0.25), Action::Punch),
    ("JUMP", Rect::new(0.85, 0.75, 0.15, 0.25), Action::Jump),
    ("CROUCH", Rect::new(0.70, 0.50, 0.15, 0.25), Action::Crouch),
    ("KICK", Rect::new(0.85, 0.50, 0.15, 0.25), Action::Kick),
    ("MENU", Rect::new(0.90, 0.00, 0.10, 0.10), Action::Menu),
];

/// Touch input over a fixed set of zones.
///
/// A touch presses the zone it starts in and releases that same zone when it
/// ends, wherever the finger is by then.
#[derive(Debug, Clone)]
pub struct TouchSource {
    zones: Vec<TouchZone>,
    active: HashMap<u32, PhysicalCode>,
    attached: bool,
}

impl TouchSource {
    pub fn new(zones: Vec<TouchZone>) -> Self {
        Self {
            zones,
            active: HashMap::new(),
            attached: false,
        }
    }

    pub fn zones(&self) -> &[TouchZone] {
        &self.zones
    }

    fn zone_at(&self, x: f64, y: f64) -> Option<&TouchZone> {
        self.zones.iter().find(|z| z.rect.contains(x, y))
    }
}

impl Default for TouchSource {
    fn default() -> Self {
        let zones = DEFAULT_ZONES
            .iter()
            .enumerate()
            .map(|(i, &(name, rect, _))| TouchZone {
                name: name.to_string(),
                code: PhysicalCode::touch_zone(i as u16),
                rect,
            })
            .collect();
        Self::new(zones)
    }
}

impl InputSource for TouchSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Touch
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.active.clear();
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn on_event(&mut self, event: &HostEvent) -> Option<RawInput> {
        if !self.attached {
            return None;
        }
        let HostEvent::Touch(touch) = event else {
            return None;
        };
        match touch.phase {
            TouchPhase::Start => {
                let code = self.zone_at(touch.x, touch.y)?.code;
                self.active.insert(touch.id, code);
                Some(RawInput::press(code))
            }
            TouchPhase::End => self.active.remove(&touch.id).map(RawInput::release),
        }
    }

    fn default_bindings(&self) -> Bindings {
        let mut bindings = Bindings::new();
        for &(name, _, action) in DEFAULT_ZONES {
            if let Some(code) = self.lookup(name) {
                bindings.bind(code, action);
            }
        }
        bindings
    }

    fn lookup(&self, name: &str) -> Option<PhysicalCode> {
        self.zones
            .iter()
            .find(|z| z.name.eq_ignore_ascii_case(name))
            .map(|z| z.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TouchEvent;

    fn touch(id: u32, phase: TouchPhase, x: f64, y: f64) -> HostEvent {
        HostEvent::Touch(TouchEvent { id, phase, x, y })
    }

    #[test]
    fn touch_presses_and_releases_its_start_zone() {
        let mut src = TouchSource::default();
        src.attach();
        let jump = src.lookup("jump").unwrap();

        assert_eq!(
            src.on_event(&touch(1, TouchPhase::Start, 0.9, 0.9)),
            Some(RawInput::press(jump))
        );
        // Finger slid off the button before lifting.
        assert_eq!(
            src.on_event(&touch(1, TouchPhase::End, 0.5, 0.5)),
            Some(RawInput::release(jump))
        );
    }

    #[test]
    fn touches_outside_zones_are_ignored() {
        let mut src = TouchSource::default();
        src.attach();
        assert_eq!(src.on_event(&touch(2, TouchPhase::Start, 0.5, 0.3)), None);
        assert_eq!(src.on_event(&touch(2, TouchPhase::End, 0.5, 0.3)), None);
    }

    #[test]
    fn detach_forgets_active_touches() {
        let mut src = TouchSource::default();
        src.attach();
        assert!(src.on_event(&touch(3, TouchPhase::Start, 0.01, 0.7)).is_some());
        src.detach();
        src.attach();
        assert_eq!(src.on_event(&touch(3, TouchPhase::End, 0.01, 0.7)), None);
    }

    #[test]
    fn default_bindings_match_zone_layout() {
        let src = TouchSource::default();
        let b = src.default_bindings();
        assert_eq!(b.len(), DEFAULT_ZONES.len());
        assert_eq!(b.get(src.lookup("DPAD_LEFT").unwrap()), Some(Action::MoveLeft));
        assert!(src.zones().iter().all(|z| z.code.is_touch()));
    }
}
