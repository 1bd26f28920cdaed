//! Simulation core - pure, deterministic, and testable
//!
//! This crate holds the game rules of the runtime. It has **no dependencies**
//! on terminals, windows, or input devices:
//!
//! - **Deterministic**: the same intents and sizer produce the same positions
//! - **Testable**: every rule is exercised by unit tests next to it
//! - **Portable**: runs headless, in a terminal, or behind any renderer
//!
//! # Module Structure
//!
//! - [`fsm`]: phase machine with a static, validated transition table
//! - [`sizer`]: viewport scaling capability consumed by movement
//! - [`entity`]: entity model, immutable per-kind templates, factory registry
//! - [`movement`]: movement intent and the per-tick resolver
//! - [`pool`]: entity lifecycle pool with per-kind graveyards
//!
//! # Example
//!
//! ```
//! use grandpa_core::{step, EntityPool, FixedSizer, Fsm};
//! use grandpa_types::{Direction, EntityKind, Phase, Trigger};
//!
//! let mut fsm = Fsm::new();
//! assert!(fsm.fire(Trigger::Play));
//! assert_eq!(fsm.current(), Phase::Playing);
//!
//! let sizer = FixedSizer::new(640.0, 360.0);
//! let mut pool = EntityPool::new();
//! let player = pool.create(EntityKind::Player, None);
//!
//! let gramps = pool.get_mut(player).unwrap();
//! gramps.movement.moving = Some(Direction::Right);
//! step(gramps, &sizer);
//! assert_eq!(gramps.x, 5.0);
//! ```

pub mod entity;
pub mod fsm;
pub mod movement;
pub mod pool;
pub mod sizer;

pub use grandpa_types as types;

// Re-export commonly used types for convenience
pub use entity::{Entity, EntityInit, EntityRegistry, Role, Speed, TilesetRef};
pub use fsm::{Fsm, FsmError, PhaseChange, Transition, TransitionError};
pub use movement::{clamp_to_viewport, detect_movement, step, MovementIntent, Steering, StepOutcome};
pub use pool::{EntityHandle, EntityPool};
pub use sizer::{FixedSizer, Sizer, ViewportSizer};
