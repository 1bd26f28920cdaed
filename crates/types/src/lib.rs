//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the runtime.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, input layer, host renderers).
//!
//! # Phases
//!
//! The game is always in exactly one [`Phase`]. Phases only change when a
//! [`Trigger`] is fired against the phase machine in `grandpa-core`.
//!
//! # Timing and Movement Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TARGET_FPS` | 60 | Loop cadence when no config overrides it |
//! | `FPS_SMOOTHING` | 0.1 | Weight of the newest sample in the fps estimate |
//! | `RUN_MULTIPLIER` | 1.75 | Speed factor while running (result rounded) |
//! | `JUMP_COOLDOWN_TICKS` | 24 | Ticks a jump suppresses ground movement |
//! | `MAX_PENDING_INPUTS` | 64 | Raw events buffered between two ticks |
//!
//! # Design Resolution
//!
//! Entity sizes and speeds are authored against a 640x360 design viewport
//! (`DESIGN_WIDTH` x `DESIGN_HEIGHT`) and scaled to the live viewport.
//!
//! # Examples
//!
//! ```
//! use grandpa_types::{Action, Direction, Phase, Trigger};
//!
//! assert_eq!(Phase::from_str("playing"), Some(Phase::Playing));
//! assert_eq!(Trigger::from_str("finish"), Some(Trigger::Finish));
//! assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
//!
//! // Diagonals carry both axes.
//! assert_eq!(Direction::UpLeft.axes(), (-1, -1));
//! assert_eq!(Direction::UpLeft.degrees(), 135);
//! ```

/// Loop cadence used when no configuration overrides it.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Weight of the newest frame sample in the exponentially smoothed fps.
pub const FPS_SMOOTHING: f64 = 0.1;

/// Speed multiplier applied while running. The product is rounded.
pub const RUN_MULTIPLIER: f64 = 1.75;

/// Number of ticks a fresh jump keeps ground movement suspended.
pub const JUMP_COOLDOWN_TICKS: u32 = 24;

/// Raw input events buffered between two ticks before new ones are dropped.
pub const MAX_PENDING_INPUTS: usize = 64;

/// Design viewport width in logical units.
pub const DESIGN_WIDTH: f64 = 640.0;

/// Design viewport height in logical units.
pub const DESIGN_HEIGHT: f64 = 360.0;


/// Top-level game phase.
///
/// - **Loading**: assets or a level are being prepared
/// - **Menu**: title menu
/// - **Starting**: a new game was requested, level setup pending
/// - **Playing**: simulation is live
/// - **Help**: play suspended to show a help topic
/// - **Lost** / **Won**: end of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Loading,
    Menu,
    Starting,
    Playing,
    Help,
    Lost,
    Won,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Loading,
        Phase::Menu,
        Phase::Starting,
        Phase::Playing,
        Phase::Help,
        Phase::Lost,
        Phase::Won,
    ];

    /// Parse phase from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use grandpa_types::Phase;
    ///
    /// assert_eq!(Phase::from_str("Loading"), Some(Phase::Loading));
    /// assert_eq!(Phase::from_str("paused"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "loading" => Some(Phase::Loading),
            "menu" => Some(Phase::Menu),
            "starting" => Some(Phase::Starting),
            "playing" => Some(Phase::Playing),
            "help" => Some(Phase::Help),
            "lost" => Some(Phase::Lost),
            "won" => Some(Phase::Won),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Menu => "menu",
            Phase::Starting => "starting",
            Phase::Playing => "playing",
            Phase::Help => "help",
            Phase::Lost => "lost",
            Phase::Won => "won",
        }
    }
}

/// Named edge of the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Initial assets loaded, show the menu
    Ready,
    /// Start a new game from the menu
    Start,
    /// Load a level
    Load,
    /// Play the level after loading it
    Play,
    /// Suspend play to show a help topic
    Help,
    /// Resume playing after a help topic
    Resume,
    /// Player died
    Lose,
    /// Player quit
    Quit,
    /// Player won
    Win,
    /// Back to the menu after a round
    Finish,
}

impl Trigger {
    pub const ALL: [Trigger; 10] = [
        Trigger::Ready,
        Trigger::Start,
        Trigger::Load,
        Trigger::Play,
        Trigger::Help,
        Trigger::Resume,
        Trigger::Lose,
        Trigger::Quit,
        Trigger::Win,
        Trigger::Finish,
    ];

    /// Parse trigger name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ready" => Some(Trigger::Ready),
            "start" => Some(Trigger::Start),
            "load" => Some(Trigger::Load),
            "play" => Some(Trigger::Play),
            "help" => Some(Trigger::Help),
            "resume" => Some(Trigger::Resume),
            "lose" => Some(Trigger::Lose),
            "quit" => Some(Trigger::Quit),
            "win" => Some(Trigger::Win),
            "finish" => Some(Trigger::Finish),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Ready => "ready",
            Trigger::Start => "start",
            Trigger::Load => "load",
            Trigger::Play => "play",
            Trigger::Help => "help",
            Trigger::Resume => "resume",
            Trigger::Lose => "lose",
            Trigger::Quit => "quit",
            Trigger::Win => "win",
            Trigger::Finish => "finish",
        }
    }
}

/// Device-independent intent produced by the input layer.
///
/// Physical keys and touch zones are bound to these; gameplay code only ever
/// sees actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Held to run at `RUN_MULTIPLIER` speed
    Run,
    Jump,
    Punch,
    Kick,
    Crouch,
    /// Open/close the in-game menu
    Menu,
    /// Toggle debug telemetry
    Debug,
}

impl Action {
    pub const COUNT: usize = 11;

    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::Run,
        Action::Jump,
        Action::Punch,
        Action::Kick,
        Action::Crouch,
        Action::Menu,
        Action::Debug,
    ];

    /// Dense index in `0..Action::COUNT`, usable for bitsets and tables.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse action from string (case-insensitive, camelCase accepted)
    ///
    /// # Examples
    ///
    /// ```
    /// use grandpa_types::Action;
    ///
    /// assert_eq!(Action::from_str("jump"), Some(Action::Jump));
    /// assert_eq!(Action::from_str("MOVERIGHT"), Some(Action::MoveRight));
    /// assert_eq!(Action::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Action::MoveLeft),
            "moveright" | "right" => Some(Action::MoveRight),
            "moveup" | "up" => Some(Action::MoveUp),
            "movedown" | "down" => Some(Action::MoveDown),
            "run" => Some(Action::Run),
            "jump" => Some(Action::Jump),
            "punch" => Some(Action::Punch),
            "kick" => Some(Action::Kick),
            "crouch" => Some(Action::Crouch),
            "menu" => Some(Action::Menu),
            "debug" => Some(Action::Debug),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::MoveUp => "moveUp",
            Action::MoveDown => "moveDown",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Punch => "punch",
            Action::Kick => "kick",
            Action::Crouch => "crouch",
            Action::Menu => "menu",
            Action::Debug => "debug",
        }
    }
}

/// Eight-way compass direction in screen space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// Unit step per axis, `(dx, dy)`, with `dy = -1` meaning up.
    pub fn axes(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, -1),
        }
    }

    /// Direction for a pair of unit steps. `(0, 0)` has no direction.
    pub fn from_axes(dx: i8, dy: i8) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Direction::Up),
            (1, -1) => Some(Direction::UpRight),
            (1, 0) => Some(Direction::Right),
            (1, 1) => Some(Direction::DownRight),
            (0, 1) => Some(Direction::Down),
            (-1, 1) => Some(Direction::DownLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, -1) => Some(Direction::UpLeft),
            _ => None,
        }
    }

    /// Heading in degrees, counter-clockwise from "right", in `-135..=180`.
    ///
    /// Renderers use this to place the landing point of a jump arc.
    pub fn degrees(&self) -> i16 {
        match self {
            Direction::Right => 0,
            Direction::UpRight => 45,
            Direction::Up => 90,
            Direction::UpLeft => 135,
            Direction::Left => 180,
            Direction::DownLeft => -135,
            Direction::Down => -90,
            Direction::DownRight => -45,
        }
    }
}

/// Press or release of a physical code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Press,
    Release,
}

/// Which physical device feeds the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Keyboard,
    Touch,
}

impl SourceKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" => Some(SourceKind::Keyboard),
            "touch" => Some(SourceKind::Touch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Keyboard => "keyboard",
            SourceKind::Touch => "touch",
        }
    }
}

/// Closed set of entity types the pool knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Npc,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Player, EntityKind::Npc];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Npc => "npc",
        }
    }
}

/// Device-specific code of a key or touch zone.
///
/// Keyboard codes follow the classic DOM `keyCode` numbering (`A` = 65,
/// `SPACE` = 32, ...) with the left/right modifier variants offset by
/// location. Touch zones live in the `0x1000..` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicalCode(pub u16);

impl PhysicalCode {
    /// First code reserved for touch zones.
    pub const TOUCH_BASE: u16 = 0x1000;

    pub fn touch_zone(index: u16) -> Self {
        PhysicalCode(Self::TOUCH_BASE + index)
    }

    pub fn is_touch(&self) -> bool {
        self.0 >= Self::TOUCH_BASE
    }
}
