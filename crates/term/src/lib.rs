//! Terminal host for the game.
//!
//! A small game-oriented rendering layer: no widgets or layout engine, just a
//! framebuffer of styled cells that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep the engine unaware of terminals
//! - Map viewport units onto cells through a [`TerminalSizer`]
//! - Redraw only what changed between frames

pub mod fb;
pub mod hold;
pub mod host;
pub mod scene;
pub mod screen;
pub mod sizer;

pub use grandpa_core as core;
pub use grandpa_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use hold::{KeyHold, HOLD_TIMEOUT};
pub use host::TerminalHost;
pub use scene::SceneView;
pub use screen::{encode_diff_into, encode_full_into, TerminalScreen};
pub use sizer::{TerminalSizer, CELL_PX_H, CELL_PX_W};
