//! Phase-gated input dispatcher.
//!
//! Host events are translated by the active [`InputSource`], resolved to an
//! [`Action`] through the current [`Bindings`] and queued. [`InputDispatcher::pump`]
//! drains the queue once per tick and calls every registration whose phase
//! matches the phase at the time that event is handled.

use arrayvec::ArrayVec;
use log::{debug, trace, warn};

use crate::bindings::Bindings;
use crate::keyboard::KeyboardSource;
use crate::source::{HostEvent, InputSource, RawInput};
use crate::touch::TouchSource;
use crate::types::{Action, Edge, Phase, SourceKind, MAX_PENDING_INPUTS};

/// Anything that knows the current game phase.
pub trait PhaseGate {
    fn phase(&self) -> Phase;
}

impl PhaseGate for grandpa_core::Fsm {
    fn phase(&self) -> Phase {
        self.current()
    }
}

/// Callback invoked with the caller's context and the event edge.
pub type ActionCallback<C> = Box<dyn FnMut(&mut C, Edge)>;

/// `{action, phase, callback}`: run `callback` for `action` while in `phase`.
pub struct Registration<C> {
    pub action: Action,
    pub phase: Phase,
    pub callback: ActionCallback<C>,
}

impl<C> Registration<C> {
    pub fn new(action: Action, phase: Phase, callback: impl FnMut(&mut C, Edge) + 'static) -> Self {
        Self {
            action,
            phase,
            callback: Box::new(callback),
        }
    }
}

impl<C> std::fmt::Debug for Registration<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("action", &self.action)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Dispatcher construction options.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub source: SourceKind,
    pub keyboard: Option<Bindings>,
    pub touch: Option<Bindings>,
}

impl DispatcherConfig {
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            keyboard: None,
            touch: None,
        }
    }

    /// Override bindings for one source kind.
    pub fn with_bindings(mut self, kind: SourceKind, bindings: Bindings) -> Self {
        match kind {
            SourceKind::Keyboard => self.keyboard = Some(bindings),
            SourceKind::Touch => self.touch = Some(bindings),
        }
        self
    }

    pub fn bindings_for(&self, kind: SourceKind) -> Option<&Bindings> {
        match kind {
            SourceKind::Keyboard => self.keyboard.as_ref(),
            SourceKind::Touch => self.touch.as_ref(),
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new(SourceKind::Keyboard)
    }
}

/// Built-in source for `kind`.
pub fn source_for(kind: SourceKind) -> Box<dyn InputSource> {
    match kind {
        SourceKind::Keyboard => Box::new(KeyboardSource::new()),
        SourceKind::Touch => Box::new(TouchSource::default()),
    }
}

/// Actions currently held down, as seen by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: [bool; Action::COUNT],
}

impl InputSnapshot {
    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    pub fn held(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.held[a.index()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    action: Action,
    edge: Edge,
}

/// Routes physical input to phase-gated action callbacks.
pub struct InputDispatcher<C> {
    config: DispatcherConfig,
    source: Box<dyn InputSource>,
    lookup: Bindings,
    registrations: Vec<Registration<C>>,
    pending: ArrayVec<Pending, MAX_PENDING_INPUTS>,
    snapshot: InputSnapshot,
}

impl<C: PhaseGate> InputDispatcher<C> {
    /// Dispatcher on the configured source, attached and ready.
    pub fn new(config: DispatcherConfig, registrations: Vec<Registration<C>>) -> Self {
        let source = source_for(config.source);
        Self::with_source(config, source, registrations)
    }

    /// Dispatcher on an explicit source, attached and ready.
    pub fn with_source(
        config: DispatcherConfig,
        source: Box<dyn InputSource>,
        registrations: Vec<Registration<C>>,
    ) -> Self {
        let lookup = Self::build_lookup(&config, &*source);
        let mut dispatcher = Self {
            config,
            source,
            lookup,
            registrations,
            pending: ArrayVec::new(),
            snapshot: InputSnapshot::default(),
        };
        dispatcher.attach();
        dispatcher
    }

    fn build_lookup(config: &DispatcherConfig, source: &dyn InputSource) -> Bindings {
        config
            .bindings_for(source.kind())
            .cloned()
            .unwrap_or_else(|| source.default_bindings())
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.lookup
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_attached()
    }

    /// Start listening to the active source. No-op when already attached.
    pub fn attach(&mut self) {
        if self.source.is_attached() {
            return;
        }
        self.source.attach();
        debug!("input attached to {}", self.source.kind().as_str());
    }

    /// Stop listening. Held and queued actions are forgotten since their
    /// releases will never arrive.
    pub fn detach(&mut self) {
        if !self.source.is_attached() {
            return;
        }
        self.source.detach();
        self.pending.clear();
        self.snapshot = InputSnapshot::default();
        debug!("input detached from {}", self.source.kind().as_str());
    }

    /// Replace the active source, keeping every registration.
    pub fn swap_source(&mut self, source: Box<dyn InputSource>) {
        self.detach();
        self.lookup = Self::build_lookup(&self.config, &*source);
        self.config.source = source.kind();
        self.source = source;
        self.attach();
    }

    /// Add a registration after construction.
    pub fn register(&mut self, registration: Registration<C>) {
        self.registrations.push(registration);
    }

    /// Accept a host event. Returns `true` if it was queued for the next pump.
    pub fn handle(&mut self, event: &HostEvent) -> bool {
        match self.source.on_event(event) {
            Some(raw) => self.queue(raw),
            None => false,
        }
    }

    /// Queue a raw event from the active source's code space.
    pub fn queue(&mut self, raw: RawInput) -> bool {
        let Some(action) = self.lookup.get(raw.code) else {
            trace!("unbound input code {}", raw.code.0);
            return false;
        };
        let pending = Pending {
            action,
            edge: raw.edge,
        };
        if self.pending.try_push(pending).is_err() {
            warn!("input queue full, dropping {} {:?}", action.as_str(), raw.edge);
            return false;
        }
        true
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deliver every queued event, in arrival order. Returns how many
    /// callbacks ran.
    pub fn pump(&mut self, ctx: &mut C) -> usize {
        let mut fired = 0;
        let pending = std::mem::take(&mut self.pending);
        for event in pending {
            fired += self.dispatch(event.action, event.edge, ctx);
        }
        fired
    }

    /// Deliver one action immediately.
    pub fn dispatch(&mut self, action: Action, edge: Edge, ctx: &mut C) -> usize {
        self.snapshot.held[action.index()] = edge == Edge::Press;

        let phase = ctx.phase();
        let mut fired = 0;
        for reg in self
            .registrations
            .iter_mut()
            .filter(|r| r.action == action && r.phase == phase)
        {
            (reg.callback)(ctx, edge);
            fired += 1;
        }
        if fired == 0 {
            trace!("{} ignored in phase {}", action.as_str(), phase.as_str());
        }
        fired
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::reverse_lookup;
    use crate::source::{TouchEvent, TouchPhase};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use grandpa_core::Fsm;
    use grandpa_types::Trigger;

    #[derive(Default)]
    struct Ctx {
        phase: Option<Phase>,
        log: Vec<(Action, Edge)>,
    }

    impl PhaseGate for Ctx {
        fn phase(&self) -> Phase {
            self.phase.unwrap_or(Phase::Playing)
        }
    }

    fn key(c: char, kind: KeyEventKind) -> HostEvent {
        HostEvent::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(c: char) -> HostEvent {
        key(c, KeyEventKind::Press)
    }

    fn recorder(action: Action, phase: Phase) -> Registration<Ctx> {
        Registration::new(action, phase, move |ctx: &mut Ctx, edge| {
            ctx.log.push((action, edge))
        })
    }

    #[test]
    fn forwards_only_in_registered_phase() {
        let mut d = InputDispatcher::new(
            DispatcherConfig::default(),
            vec![recorder(Action::Jump, Phase::Playing)],
        );
        let mut ctx = Ctx {
            phase: Some(Phase::Loading),
            ..Ctx::default()
        };

        assert!(d.handle(&press(' ')));
        assert_eq!(d.pump(&mut ctx), 0);
        assert!(ctx.log.is_empty());

        ctx.phase = Some(Phase::Playing);
        d.handle(&press(' '));
        assert_eq!(d.pump(&mut ctx), 1);
        assert_eq!(ctx.log, vec![(Action::Jump, Edge::Press)]);
    }

    #[test]
    fn unbound_codes_are_ignored() {
        let mut d: InputDispatcher<Ctx> = InputDispatcher::new(DispatcherConfig::default(), vec![]);
        assert!(!d.handle(&press('x')));
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn each_raw_event_is_handled_independently() {
        let mut d = InputDispatcher::new(
            DispatcherConfig::default(),
            vec![recorder(Action::Punch, Phase::Playing)],
        );
        let mut ctx = Ctx::default();
        d.handle(&press('j'));
        d.handle(&key('j', KeyEventKind::Repeat));
        d.handle(&key('j', KeyEventKind::Release));
        assert_eq!(d.pump(&mut ctx), 3);
        assert_eq!(
            ctx.log,
            vec![
                (Action::Punch, Edge::Press),
                (Action::Punch, Edge::Press),
                (Action::Punch, Edge::Release)
            ]
        );
    }

    #[test]
    fn attach_is_idempotent_and_detach_stops_events() {
        let mut d = InputDispatcher::new(
            DispatcherConfig::default(),
            vec![recorder(Action::Kick, Phase::Playing)],
        );
        let mut ctx = Ctx::default();
        d.attach();
        d.attach();
        d.handle(&press('k'));
        assert_eq!(d.pump(&mut ctx), 1);

        d.detach();
        assert!(!d.is_attached());
        assert!(!d.handle(&press('k')));

        d.attach();
        d.handle(&press('k'));
        assert_eq!(d.pump(&mut ctx), 1);
        assert_eq!(ctx.log.len(), 2);
    }

    #[test]
    fn detach_drops_queued_events() {
        let mut d = InputDispatcher::new(
            DispatcherConfig::default(),
            vec![recorder(Action::MoveLeft, Phase::Playing)],
        );
        let mut ctx = Ctx::default();
        assert!(d.handle(&press('a')));
        d.detach();
        d.attach();
        assert_eq!(d.pending(), 0);
        assert_eq!(d.pump(&mut ctx), 0);
        assert!(ctx.log.is_empty());

        d.handle(&press('a'));
        d.swap_source(source_for(SourceKind::Touch));
        assert_eq!(d.pump(&mut ctx), 0);
    }

    #[test]
    fn swap_source_keeps_registrations() {
        let mut d = InputDispatcher::new(
            DispatcherConfig::default(),
            vec![recorder(Action::Jump, Phase::Playing)],
        );
        let mut ctx = Ctx::default();

        d.swap_source(source_for(SourceKind::Touch));
        assert_eq!(d.source_kind(), SourceKind::Touch);
        assert!(d.is_attached());
        // Keyboard events no longer reach the dispatcher.
        assert!(!d.handle(&press(' ')));

        let tap = HostEvent::Touch(TouchEvent {
            id: 7,
            phase: TouchPhase::Start,
            x: 0.9,
            y: 0.9,
        });
        assert!(d.handle(&tap));
        assert_eq!(d.pump(&mut ctx), 1);

        d.swap_source(source_for(SourceKind::Keyboard));
        d.handle(&press(' '));
        assert_eq!(d.pump(&mut ctx), 1);
        assert_eq!(ctx.log.len(), 2);
    }

    #[test]
    fn configured_bindings_override_defaults() {
        let bindings = Bindings::from_named([("X", Action::Jump)], reverse_lookup).unwrap();
        let config = DispatcherConfig::default().with_bindings(SourceKind::Keyboard, bindings);
        let mut d = InputDispatcher::new(config, vec![recorder(Action::Jump, Phase::Playing)]);
        let mut ctx = Ctx::default();

        assert!(!d.handle(&press(' ')));
        assert!(d.handle(&press('x')));
        assert_eq!(d.pump(&mut ctx), 1);
    }

    #[test]
    fn phase_is_read_once_per_event() {
        // Two registrations on the same action in adjacent phases must not
        // chain within a single press.
        struct Machine(Fsm, u32);
        impl PhaseGate for Machine {
            fn phase(&self) -> Phase {
                self.0.current()
            }
        }

        let regs = vec![
            Registration::new(Action::Menu, Phase::Playing, |m: &mut Machine, e| {
                if e == Edge::Press {
                    m.0.fire(Trigger::Help);
                    m.1 += 1;
                }
            }),
            Registration::new(Action::Menu, Phase::Help, |m: &mut Machine, e| {
                if e == Edge::Press {
                    m.0.fire(Trigger::Resume);
                    m.1 += 1;
                }
            }),
        ];
        let mut d = InputDispatcher::new(DispatcherConfig::default(), regs);
        let mut fsm = Fsm::new();
        fsm.fire(Trigger::Play);
        let mut m = Machine(fsm, 0);

        d.dispatch(Action::Menu, Edge::Press, &mut m);
        assert_eq!(m.0.current(), Phase::Help);
        assert_eq!(m.1, 1);

        d.dispatch(Action::Menu, Edge::Press, &mut m);
        assert_eq!(m.0.current(), Phase::Playing);
        assert_eq!(m.1, 2);
    }

    #[test]
    fn snapshot_tracks_held_actions() {
        let mut d: InputDispatcher<Ctx> = InputDispatcher::new(DispatcherConfig::default(), vec![]);
        let mut ctx = Ctx::default();
        d.handle(&press('a'));
        d.handle(&press('l'));
        d.pump(&mut ctx);
        let snap = d.snapshot();
        assert!(snap.is_held(Action::MoveLeft));
        assert_eq!(snap.held().collect::<Vec<_>>(), vec![Action::MoveLeft, Action::Run]);

        d.handle(&key('a', KeyEventKind::Release));
        d.pump(&mut ctx);
        assert!(!d.snapshot().is_held(Action::MoveLeft));

        d.detach();
        assert!(!d.snapshot().is_held(Action::Run));
    }

    #[test]
    fn dispatcher_queries_fsm_directly() {
        let mut d = InputDispatcher::new(
            DispatcherConfig::default(),
            vec![Registration::new(Action::Jump, Phase::Playing, |fsm: &mut Fsm, _| {
                fsm.fire(Trigger::Win);
            })],
        );
        let mut fsm = Fsm::new();
        d.handle(&press(' '));
        d.pump(&mut fsm);
        assert_eq!(fsm.current(), Phase::Loading);

        fsm.fire(Trigger::Play);
        d.handle(&press(' '));
        d.pump(&mut fsm);
        assert_eq!(fsm.current(), Phase::Won);
    }
}
