//! Physical input source capability.
//!
//! A source turns host events (terminal keys, touches) into raw press/release
//! events of physical codes. Sources only report while attached; the
//! dispatcher decides what the codes mean.

use crossterm::event::KeyEvent;

use crate::bindings::Bindings;
use crate::types::{Edge, PhysicalCode, SourceKind};

/// Touch lifecycle reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    End,
}

/// One touch point in normalized viewport coordinates (`0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub id: u32,
    pub phase: TouchPhase,
    pub x: f64,
    pub y: f64,
}

/// Event delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Key(KeyEvent),
    Touch(TouchEvent),
}

/// Press or release of one physical code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInput {
    pub edge: Edge,
    pub code: PhysicalCode,
}

impl RawInput {
    pub fn press(code: PhysicalCode) -> Self {
        Self {
            edge: Edge::Press,
            code,
        }
    }

    pub fn release(code: PhysicalCode) -> Self {
        Self {
            edge: Edge::Release,
            code,
        }
    }
}

/// A device the dispatcher can listen to.
pub trait InputSource {
    fn kind(&self) -> SourceKind;

    /// Start reporting events. Attaching an attached source does nothing.
    fn attach(&mut self);

    /// Stop reporting events and forget any in-progress presses.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;

    /// Translate a host event. Returns `None` while detached, for events of
    /// another device, and for events with no physical code.
    fn on_event(&mut self, event: &HostEvent) -> Option<RawInput>;

    /// Bindings used when the configuration has none for this source.
    fn default_bindings(&self) -> Bindings;

    /// Reverse lookup from a human-readable name to a code of this source.
    fn lookup(&self, name: &str) -> Option<PhysicalCode>;
}
