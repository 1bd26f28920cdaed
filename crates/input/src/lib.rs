//! Input module (engine-facing).
//!
//! This module is independent of any UI framework loop. Physical devices are
//! [`InputSource`]s that turn host events into raw press/release codes; the
//! [`InputDispatcher`] maps codes to [`types::Action`]s and only forwards an
//! action to callbacks registered for the current game phase.
//!
//! Keyboard events come from `crossterm`; touch events are plain structs the
//! host fills in.

pub mod bindings;
pub mod dispatcher;
pub mod keyboard;
pub mod map;
pub mod source;
pub mod touch;

pub use grandpa_types as types;

pub use bindings::{BindingError, Bindings};
pub use dispatcher::{
    source_for, ActionCallback, DispatcherConfig, InputDispatcher, InputSnapshot, PhaseGate,
    Registration,
};
pub use keyboard::KeyboardSource;
pub use map::{code_for_key, reverse_lookup, should_quit};
pub use source::{HostEvent, InputSource, RawInput, TouchEvent, TouchPhase};
pub use touch::{Rect, TouchSource, TouchZone};
