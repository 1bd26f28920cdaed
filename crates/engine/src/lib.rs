//! Game engine: loop, session wiring, and the collaborator boundaries
//!
//! This crate turns the pure pieces from `grandpa-core` and `grandpa-input`
//! into a running game. It still owns no terminal or window; hosts plug in a
//! [`Renderer`] and a [`grandpa_core::Sizer`] and drive a [`GameLoop`].
//!
//! # Module Structure
//!
//! - [`game_loop`]: clock abstraction and the best-effort fixed-rate loop
//! - [`session`]: FSM, pool, input and renderer wired into one game
//! - [`bus`]: explicit per-session event bus
//! - [`render`]: renderer trait, tileset load channel, headless renderer
//! - [`telemetry`]: per-tick debug observer
//! - [`config`]: JSON configuration with environment overrides
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use grandpa_core::FixedSizer;
//! use grandpa_engine::{GameConfig, GameLoop, HeadlessRenderer, ManualClock, Session};
//! use grandpa_engine::types::Phase;
//!
//! let config = GameConfig::default();
//! let mut session = Session::new(
//!     &config,
//!     FixedSizer::new(640.0, 360.0),
//!     HeadlessRenderer::default(),
//! )
//! .unwrap();
//!
//! let clock = ManualClock::new();
//! let mut game_loop = GameLoop::new(clock.clone(), 60);
//! game_loop.start();
//! game_loop.advance(&mut session);
//! assert_eq!(session.phase(), Phase::Menu);
//! clock.advance(Duration::from_millis(20));
//! ```

pub mod bus;
pub mod config;
pub mod game_loop;
pub mod render;
pub mod session;
pub mod telemetry;

pub use grandpa_types as types;

pub use bus::{AttackKind, EventBus, GameEvent, GameTopic, SubscriptionId, Topic};
pub use config::{ConfigError, GameConfig, InputConfig, LevelConfig, LoopConfig, ViewportConfig};
pub use game_loop::{Clock, GameLoop, LoopHandler, LoopSnapshot, ManualClock, MonotonicClock, Tick};
pub use render::{HeadlessRenderer, Renderer, Tileset, TilesetsLoaded, TilesetsReady};
pub use session::{registrations, Session, World};
pub use telemetry::{LogTelemetry, Telemetry, TelemetryFrame};
