//! Synthetic key releases for terminals that only report presses.
//!
//! Most terminals send a key press followed by auto-repeat presses and never
//! a release. A key counts as held while presses keep arriving and as
//! released once none has arrived for the hold timeout, which has to outlast
//! the usual auto-repeat delay.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

pub const HOLD_TIMEOUT: Duration = Duration::from_millis(550);

#[derive(Debug, Clone)]
pub struct KeyHold {
    timeout: Duration,
    held: HashMap<KeyCode, Instant>,
}

impl KeyHold {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            held: HashMap::new(),
        }
    }

    /// Record a press or auto-repeat. Returns `true` when it starts a hold.
    pub fn press(&mut self, code: KeyCode, now: Instant) -> bool {
        self.held.insert(code, now).is_none()
    }

    /// Keys whose hold lapsed by `now`; they are forgotten.
    pub fn expire(&mut self, now: Instant) -> Vec<KeyCode> {
        let timeout = self.timeout;
        let lapsed: Vec<KeyCode> = self
            .held
            .iter()
            .filter(|&(_, &at)| now.saturating_duration_since(at) >= timeout)
            .map(|(&code, _)| code)
            .collect();
        for code in &lapsed {
            self.held.remove(code);
        }
        lapsed
    }

    /// Time until the next hold lapses.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.held
            .values()
            .map(|&at| (at + self.timeout).saturating_duration_since(now))
            .min()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl Default for KeyHold {
    fn default() -> Self {
        Self::new(HOLD_TIMEOUT)
    }
}
