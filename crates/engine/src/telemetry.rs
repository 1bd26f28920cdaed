//! Per-tick debug observation hook.

use std::time::Duration;

use log::debug;

use grandpa_core::Entity;
use grandpa_input::InputSnapshot;

use crate::game_loop::LoopSnapshot;

/// Everything a debug observer sees for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryFrame<'a> {
    pub entity: &'a Entity,
    pub input: InputSnapshot,
    pub runtime: Duration,
    pub fps: f64,
    pub loop_ctx: LoopSnapshot,
}

/// Observer called once per playing tick while debug mode is on.
pub trait Telemetry {
    fn observe(&mut self, frame: &TelemetryFrame<'_>);
}

/// Writes one `debug!` line per observed tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn observe(&mut self, frame: &TelemetryFrame<'_>) {
        let held: Vec<&str> = frame.input.held().map(|a| a.as_str()).collect();
        let e = frame.entity;
        debug!(
            target: "grandpa::telemetry",
            "t={:.3}s fps={:.1} tick={} pos=({:.1},{:.1}) moving={:?} running={} jumping={} held=[{}]",
            frame.runtime.as_secs_f64(),
            frame.fps,
            frame.loop_ctx.ticks,
            e.x,
            e.y,
            e.movement.moving,
            e.movement.running,
            e.movement.jumping,
            held.join(",")
        );
    }
}
