//! Variable-delta game loop.
//!
//! The loop does not own a thread or a timer. A host calls
//! [`GameLoop::advance`] whenever it wakes up (after polling input, after a
//! sleep of [`GameLoop::time_until_next_tick`], ...). When a tick is due the
//! loop runs `update` then `render` exactly once. A slow tick only delays the
//! next one; there is no catch-up and no interpolation.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::types::{DEFAULT_TARGET_FPS, FPS_SMOOTHING};

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Receiver of loop ticks.
///
/// `update` gets the loop's own snapshot, taken after the tick was counted.
pub trait LoopHandler {
    fn update(&mut self, runtime: Duration, loop_ctx: LoopSnapshot);
    fn render(&mut self, runtime: Duration);
}

/// What one tick reported to the handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: u64,
    pub runtime: Duration,
    pub fps: f64,
}

/// Loop state for observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSnapshot {
    pub running: bool,
    pub ticks: u64,
    pub fps: f64,
}

/// Best-effort fixed-rate scheduler.
#[derive(Debug)]
pub struct GameLoop<K: Clock = MonotonicClock> {
    clock: K,
    interval: Duration,
    running: bool,
    next_due: Duration,
    last_tick: Option<Duration>,
    fps: f64,
    ticks: u64,
}

impl GameLoop<MonotonicClock> {
    /// Loop on the wall clock at the default cadence.
    pub fn with_default_rate() -> Self {
        Self::new(MonotonicClock::new(), DEFAULT_TARGET_FPS)
    }
}

impl<K: Clock> GameLoop<K> {
    pub fn new(clock: K, target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            clock,
            interval: Duration::from_secs(1) / target_fps,
            running: false,
            next_due: Duration::ZERO,
            last_tick: None,
            fps: 0.0,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn snapshot(&self) -> LoopSnapshot {
        LoopSnapshot {
            running: self.running,
            ticks: self.ticks,
            fps: self.fps,
        }
    }

    /// Begin scheduling ticks. Starting a running loop changes nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_due = self.clock.now();
        // The pause gap is not a frame; restart the fps estimate.
        self.last_tick = None;
        info!("loop started at {} ticks", self.ticks);
    }

    /// Stop scheduling ticks. Pausing a paused loop changes nothing.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!("loop paused at {} ticks", self.ticks);
    }

    /// Host visibility or focus change.
    pub fn on_visibility(&mut self, visible: bool) {
        if visible {
            self.start();
        } else {
            self.pause();
        }
    }

    /// How long a host may sleep before the next tick is due.
    ///
    /// `None` while paused.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Some(self.next_due.saturating_sub(self.clock.now()))
    }

    /// Run one tick if one is due.
    pub fn advance(&mut self, handler: &mut impl LoopHandler) -> Option<Tick> {
        if !self.running {
            return None;
        }
        let now = self.clock.now();
        if now < self.next_due {
            return None;
        }

        self.fps = match self.last_tick {
            Some(last) if now > last => {
                let sample = 1.0 / (now - last).as_secs_f64();
                if self.fps > 0.0 {
                    self.fps + (sample - self.fps) * FPS_SMOOTHING
                } else {
                    sample
                }
            }
            _ if self.fps > 0.0 => self.fps,
            _ => 1.0 / self.interval.as_secs_f64(),
        };
        self.last_tick = Some(now);
        self.next_due = now + self.interval;
        self.ticks += 1;

        handler.update(now, self.snapshot());
        handler.render(now);

        if self.ticks % 600 == 0 {
            debug!("tick {} runtime {:?} fps {:.1}", self.ticks, now, self.fps);
        }

        Some(Tick {
            index: self.ticks,
            runtime: now,
            fps: self.fps,
        })
    }
}
