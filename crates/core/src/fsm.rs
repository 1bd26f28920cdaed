//! Phase machine - owns the current [`Phase`] and validates every change.
//!
//! Transitions are a static table fixed at construction. Firing a trigger is a
//! single check-and-set: it either moves to the transition's target phase or
//! leaves the machine untouched and reports why.

use log::{debug, trace};
use thiserror::Error;

use crate::types::{Phase, Trigger};

/// One named edge of the phase machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub name: Trigger,
    pub from: Vec<Phase>,
    pub to: Phase,
}

impl Transition {
    pub fn new(name: Trigger, from: &[Phase], to: Phase) -> Self {
        Self {
            name,
            from: from.to_vec(),
            to,
        }
    }

    fn accepts(&self, phase: Phase) -> bool {
        self.from.contains(&phase)
    }
}

/// Result of an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub trigger: Trigger,
    pub from: Phase,
    pub to: Phase,
}

/// A trigger that is not valid from the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("transition `{}` is not allowed from phase `{}`", .trigger.as_str(), .phase.as_str())]
    InvalidTransition { trigger: Trigger, phase: Phase },
}

/// A malformed transition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("transition `{}` has an empty `from` set", .0.as_str())]
    EmptyFrom(Trigger),
    #[error("transition `{}` from `{}` is ambiguous", .trigger.as_str(), .phase.as_str())]
    Ambiguous { trigger: Trigger, phase: Phase },
}

/// The game's transition table.
pub fn standard_transitions() -> Vec<Transition> {
    use Phase::*;

    vec![
        Transition::new(Trigger::Ready, &[Loading], Menu),
        Transition::new(Trigger::Start, &[Menu], Starting),
        Transition::new(Trigger::Load, &[Starting, Playing], Loading),
        Transition::new(Trigger::Play, &[Loading], Playing),
        Transition::new(Trigger::Help, &[Loading, Playing], Help),
        Transition::new(Trigger::Resume, &[Help], Playing),
        Transition::new(Trigger::Lose, &[Playing], Lost),
        Transition::new(Trigger::Quit, &[Playing], Lost),
        Transition::new(Trigger::Win, &[Playing], Won),
        Transition::new(Trigger::Finish, &[Won, Lost], Menu),
    ]
}

/// Finite-state machine over [`Phase`].
#[derive(Debug, Clone)]
pub struct Fsm {
    current: Phase,
    transitions: Vec<Transition>,
}

impl Fsm {
    /// Machine in `loading` with the standard table.
    pub fn new() -> Self {
        Self {
            current: Phase::Loading,
            transitions: standard_transitions(),
        }
    }

    /// Machine with a custom table.
    ///
    /// Same-name entries are allowed as long as their `from` sets do not
    /// overlap with different targets.
    pub fn with_table(initial: Phase, transitions: Vec<Transition>) -> Result<Self, FsmError> {
        for (i, t) in transitions.iter().enumerate() {
            if t.from.is_empty() {
                return Err(FsmError::EmptyFrom(t.name));
            }
            for other in &transitions[i + 1..] {
                if other.name != t.name || other.to == t.to {
                    continue;
                }
                if let Some(&phase) = t.from.iter().find(|p| other.from.contains(p)) {
                    return Err(FsmError::Ambiguous {
                        trigger: t.name,
                        phase,
                    });
                }
            }
        }

        Ok(Self {
            current: initial,
            transitions,
        })
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn is(&self, phase: Phase) -> bool {
        self.current == phase
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn find(&self, trigger: Trigger) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.name == trigger && t.accepts(self.current))
    }

    /// Whether `trigger` would succeed right now. Never mutates.
    pub fn can_fire(&self, trigger: Trigger) -> bool {
        self.find(trigger).is_some()
    }

    /// Fire `trigger`, reporting the phase change or why it was rejected.
    pub fn try_fire(&mut self, trigger: Trigger) -> Result<PhaseChange, TransitionError> {
        let Some(to) = self.find(trigger).map(|t| t.to) else {
            trace!(
                "rejected transition {} from {}",
                trigger.as_str(),
                self.current.as_str()
            );
            return Err(TransitionError::InvalidTransition {
                trigger,
                phase: self.current,
            });
        };

        let change = PhaseChange {
            trigger,
            from: self.current,
            to,
        };
        self.current = to;
        debug!(
            "phase {} -> {} ({})",
            change.from.as_str(),
            change.to.as_str(),
            trigger.as_str()
        );
        Ok(change)
    }

    /// Fire `trigger`; `false` means it was not valid and nothing changed.
    pub fn fire(&mut self, trigger: Trigger) -> bool {
        self.try_fire(trigger).is_ok()
    }

    /// Triggers that can fire from the current phase, in table order.
    pub fn available(&self) -> Vec<Trigger> {
        let mut out = Vec::new();
        for t in &self.transitions {
            if t.accepts(self.current) && !out.contains(&t.name) {
                out.push(t.name);
            }
        }
        out
    }
}

impl Default for Fsm {
    fn default() -> Self {
        Self::new()
    }
}
