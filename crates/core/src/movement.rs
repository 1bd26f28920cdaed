//! Movement resolver - turns an entity's intent into a clamped position.
//!
//! One call to [`step`] is one tick for one entity:
//!
//! - a pending jump cooldown is decremented and ground movement is skipped
//! - otherwise [`detect_movement`] applies the intent
//!
//! Either way the entity ends the tick inside the viewport, even if the
//! viewport shrank underneath it.
//!
//! Speeds go through [`Sizer::scale`] so on-screen speed follows the viewport
//! while logical speed stays fixed. Diagonals move both axes by the full
//! scaled speed (not normalized).

use crate::entity::Entity;
use crate::sizer::Sizer;
use crate::types::{Direction, RUN_MULTIPLIER};

/// Desired motion of one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub moving: Option<Direction>,
    pub running: bool,
    /// Jump cooldown in ticks; `0` means not jumping.
    pub jumping: u32,
    pub stunned: bool,
}

impl MovementIntent {
    pub fn is_jumping(&self) -> bool {
        self.jumping > 0
    }
}

/// What a tick did to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Jump cooldown ticked; ground movement skipped.
    Airborne,
    /// Stunned; nothing moved.
    Stunned,
    /// Ground movement resolved (possibly a zero delta).
    Moved,
}

/// Decrement a cooldown toward zero.
pub fn cool_down(value: u32) -> u32 {
    value.saturating_sub(1)
}

/// Clamp `value` into `[min, max]`. A negative range collapses onto `min`.
pub fn min_max(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Per-axis speed for this tick, before scaling.
pub fn effective_speed(base: f64, running: bool) -> f64 {
    if running {
        (base * RUN_MULTIPLIER).round()
    } else {
        base
    }
}

/// Pull the entity back inside the viewport without touching its intent.
pub fn clamp_to_viewport(entity: &mut Entity, sizer: &dyn Sizer) {
    let max_x = sizer.width() - sizer.scale(entity.width);
    let max_y = sizer.height() - sizer.scale(entity.height);
    entity.x = min_max(entity.x, 0.0, max_x);
    entity.y = min_max(entity.y, 0.0, max_y);
}

/// Apply the entity's intent for one tick and clamp it to the viewport.
pub fn detect_movement(entity: &mut Entity, sizer: &dyn Sizer) -> StepOutcome {
    let movement = entity.movement;
    if movement.stunned {
        clamp_to_viewport(entity, sizer);
        return StepOutcome::Stunned;
    }

    let mut x = entity.x;
    let mut y = entity.y;

    if let Some(direction) = movement.moving {
        let (dx, dy) = direction.axes();
        let speed_x = sizer.scale(effective_speed(entity.speed.x, movement.running));
        let speed_y = sizer.scale(effective_speed(entity.speed.y, movement.running));
        x += f64::from(dx) * speed_x;
        y += f64::from(dy) * speed_y;
    }

    entity.x = x;
    entity.y = y;
    clamp_to_viewport(entity, sizer);
    StepOutcome::Moved
}

/// One tick of movement for `entity`.
pub fn step(entity: &mut Entity, sizer: &dyn Sizer) -> StepOutcome {
    if entity.movement.is_jumping() {
        entity.movement.jumping = cool_down(entity.movement.jumping);
        clamp_to_viewport(entity, sizer);
        return StepOutcome::Airborne;
    }
    detect_movement(entity, sizer)
}

/// Held directional inputs folded into one 8-way direction.
///
/// Opposite directions cancel, so holding left and right reads as no
/// horizontal movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Steering {
    pub fn direction(&self) -> Option<Direction> {
        let dx = i8::from(self.right) - i8::from(self.left);
        let dy = i8::from(self.down) - i8::from(self.up);
        Direction::from_axes(dx, dy)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
