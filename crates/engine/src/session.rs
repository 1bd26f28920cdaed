//! One game session: FSM, entity pool, input, renderer and bus wired together.
//!
//! ## Tick order
//!
//! | step | what happens |
//! |---|---|
//! | pump | queued input is delivered to callbacks gated on the current phase |
//! | loads | finished tileset loads fire `play` (level) or `ready` (boot) |
//! | phase work | `starting` builds the level, `playing` steps every entity |
//! | render | the renderer gets the entities in pool order |
//!
//! ## Controls per phase
//!
//! | phase | action | effect |
//! |---|---|---|
//! | playing | moves | steer the player (8-way, opposites cancel) |
//! | playing | run | running while held |
//! | playing | jump | start a jump unless already airborne |
//! | playing | punch / kick | publish [`GameEvent::Attack`] |
//! | playing | crouch | crouch while held; no walking while crouched |
//! | playing | menu | `help` |
//! | help | menu | `resume` |
//! | menu | menu / jump | `start` |
//! | won, lost | menu / jump | `finish` |
//! | any | debug | toggle telemetry |

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use log::{debug, info, warn};

use grandpa_core::{step, Entity, EntityHandle, EntityInit, EntityPool, Fsm, Sizer, Steering};
use grandpa_input::{source_for, HostEvent, InputDispatcher, InputSnapshot, PhaseGate, Registration};

use crate::bus::{AttackKind, EventBus, GameEvent};
use crate::config::{ConfigError, GameConfig};
use crate::game_loop::{Clock, GameLoop, LoopHandler, LoopSnapshot};
use crate::render::{Renderer, Tileset, TilesetsLoaded, TilesetsReady};
use crate::telemetry::{LogTelemetry, Telemetry, TelemetryFrame};
use crate::types::{Action, Edge, EntityKind, Phase, SourceKind, Trigger, JUMP_COOLDOWN_TICKS};

/// Game state reachable from input callbacks.
#[derive(Debug)]
pub struct World {
    fsm: Fsm,
    pool: EntityPool,
    bus: EventBus<GameEvent>,
    player: Option<EntityHandle>,
    steering: Steering,
    debug: bool,
    level_requested: bool,
}

impl PhaseGate for World {
    fn phase(&self) -> Phase {
        self.fsm.current()
    }
}

impl World {
    pub fn new(debug: bool) -> Self {
        Self {
            fsm: Fsm::new(),
            pool: EntityPool::new(),
            bus: EventBus::new(),
            player: None,
            steering: Steering::default(),
            debug,
            level_requested: false,
        }
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut EntityPool {
        &mut self.pool
    }

    pub fn bus_mut(&mut self) -> &mut EventBus<GameEvent> {
        &mut self.bus
    }

    pub fn player_handle(&self) -> Option<EntityHandle> {
        self.player
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|h| self.pool.get(h))
    }

    fn player_mut(&mut self) -> Option<&mut Entity> {
        let handle = self.player?;
        self.pool.get_mut(handle)
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Fire `trigger` and announce the change. Rejected triggers are ignored.
    pub fn fire(&mut self, trigger: Trigger) -> bool {
        let Ok(change) = self.fsm.try_fire(trigger) else {
            return false;
        };
        if change.from == Phase::Playing {
            // Releases are not delivered outside `playing`.
            self.release_controls();
        }
        self.bus.publish(&GameEvent::PhaseChanged(change));
        true
    }

    /// Forget every held control on the player.
    pub fn release_controls(&mut self) {
        self.steering.clear();
        if let Some(player) = self.player_mut() {
            player.movement.moving = None;
            player.movement.running = false;
            if let Some(data) = player.player_mut() {
                data.crouching = false;
            }
        }
    }

    fn steer(&mut self, action: Action, edge: Edge) {
        let held = edge == Edge::Press;
        match action {
            Action::MoveLeft => self.steering.left = held,
            Action::MoveRight => self.steering.right = held,
            Action::MoveUp => self.steering.up = held,
            Action::MoveDown => self.steering.down = held,
            _ => return,
        }
        self.apply_steering();
    }

    fn apply_steering(&mut self) {
        let direction = self.steering.direction();
        if let Some(player) = self.player_mut() {
            let crouched = player.player().is_some_and(|p| p.crouching);
            player.movement.moving = if crouched { None } else { direction };
        }
    }

    fn set_running(&mut self, edge: Edge) {
        if let Some(player) = self.player_mut() {
            player.movement.running = edge == Edge::Press;
        }
    }

    fn jump(&mut self, edge: Edge) {
        if edge != Edge::Press {
            return;
        }
        if let Some(player) = self.player_mut() {
            if !player.movement.is_jumping() {
                player.movement.jumping = JUMP_COOLDOWN_TICKS;
            }
        }
    }

    fn crouch(&mut self, edge: Edge) {
        if let Some(data) = self.player_mut().and_then(|p| p.player_mut()) {
            data.crouching = edge == Edge::Press;
        }
        self.apply_steering();
    }

    fn attack(&mut self, kind: AttackKind, edge: Edge) {
        if edge != Edge::Press {
            return;
        }
        if let Some(attacker) = self.player {
            self.bus.publish(&GameEvent::Attack { attacker, kind });
        }
    }

    fn toggle_debug(&mut self, edge: Edge) {
        if edge != Edge::Press {
            return;
        }
        self.debug = !self.debug;
        info!("debug {}", if self.debug { "on" } else { "off" });
        self.bus.publish(&GameEvent::DebugToggled(self.debug));
    }
}

fn on_press(trigger: Trigger) -> impl FnMut(&mut World, Edge) {
    move |world: &mut World, edge: Edge| {
        if edge == Edge::Press {
            world.fire(trigger);
        }
    }
}

/// Input wiring for every phase.
pub fn registrations() -> Vec<Registration<World>> {
    let mut regs = Vec::new();

    for action in [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
    ] {
        regs.push(Registration::new(action, Phase::Playing, move |w: &mut World, e| {
            w.steer(action, e)
        }));
    }
    regs.push(Registration::new(Action::Run, Phase::Playing, |w: &mut World, e| {
        w.set_running(e)
    }));
    regs.push(Registration::new(Action::Jump, Phase::Playing, |w: &mut World, e| w.jump(e)));
    regs.push(Registration::new(Action::Crouch, Phase::Playing, |w: &mut World, e| {
        w.crouch(e)
    }));
    regs.push(Registration::new(Action::Punch, Phase::Playing, |w: &mut World, e| {
        w.attack(AttackKind::Punch, e)
    }));
    regs.push(Registration::new(Action::Kick, Phase::Playing, |w: &mut World, e| {
        w.attack(AttackKind::Kick, e)
    }));

    regs.push(Registration::new(Action::Menu, Phase::Playing, on_press(Trigger::Help)));
    regs.push(Registration::new(Action::Menu, Phase::Help, on_press(Trigger::Resume)));
    regs.push(Registration::new(Action::Menu, Phase::Menu, on_press(Trigger::Start)));
    regs.push(Registration::new(Action::Jump, Phase::Menu, on_press(Trigger::Start)));
    for phase in [Phase::Won, Phase::Lost] {
        regs.push(Registration::new(Action::Menu, phase, on_press(Trigger::Finish)));
        regs.push(Registration::new(Action::Jump, phase, on_press(Trigger::Finish)));
    }

    for phase in Phase::ALL {
        regs.push(Registration::new(Action::Debug, phase, |w: &mut World, e| {
            w.toggle_debug(e)
        }));
    }
    regs
}

/// Distinct tilesets used by the given entities, in id order.
fn tilesets_of<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Vec<Tileset> {
    entities
        .into_iter()
        .map(|e| (e.tileset.id.clone(), e.tileset.src.clone()))
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(id, src)| Tileset::new(id, src))
        .collect()
}

/// A running game: world state plus its collaborators.
pub struct Session<R: Renderer, S: Sizer> {
    world: World,
    input: InputDispatcher<World>,
    sizer: S,
    renderer: R,
    telemetry: Box<dyn Telemetry>,
    loads_tx: TilesetsReady,
    loads_rx: Receiver<TilesetsLoaded>,
    npcs: u32,
}

impl<R: Renderer, S: Sizer> Session<R, S> {
    /// Build a session in `loading` and request the boot tilesets.
    pub fn new(config: &GameConfig, sizer: S, mut renderer: R) -> Result<Self, ConfigError> {
        let input = InputDispatcher::new(config.dispatcher_config()?, registrations());
        let world = World::new(config.debug);
        let (loads_tx, loads_rx) = mpsc::channel();

        let boot = tilesets_of(
            EntityKind::ALL
                .iter()
                .filter_map(|&k| world.pool.registry().template(k)),
        );
        renderer.load_tilesets(&boot, loads_tx.clone());
        info!(
            "session created: input={} npcs={} debug={}",
            input.source_kind().as_str(),
            config.level.npcs,
            config.debug
        );

        Ok(Self {
            world,
            input,
            sizer,
            renderer,
            telemetry: Box::new(LogTelemetry),
            loads_tx,
            loads_rx,
            npcs: config.level.npcs,
        })
    }

    pub fn with_telemetry(mut self, telemetry: impl Telemetry + 'static) -> Self {
        self.telemetry = Box::new(telemetry);
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn phase(&self) -> Phase {
        self.world.fsm.current()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn sizer(&self) -> &S {
        &self.sizer
    }

    pub fn sizer_mut(&mut self) -> &mut S {
        &mut self.sizer
    }

    pub fn input(&self) -> &InputDispatcher<World> {
        &self.input
    }

    pub fn input_snapshot(&self) -> InputSnapshot {
        self.input.snapshot()
    }

    /// Queue a host event for the next tick.
    pub fn handle(&mut self, event: &HostEvent) -> bool {
        self.input.handle(event)
    }

    /// Switch input device, keeping every registration.
    pub fn swap_input(&mut self, kind: SourceKind) {
        if self.input.source_kind() == kind {
            return;
        }
        self.world.release_controls();
        self.input.swap_source(source_for(kind));
        info!("input source now {}", kind.as_str());
    }

    /// Host focus change: losing focus pauses the loop and drops held input.
    pub fn on_focus<K: Clock>(&mut self, game_loop: &mut GameLoop<K>, focused: bool) {
        if focused {
            self.input.attach();
        } else {
            self.input.detach();
            self.world.release_controls();
        }
        game_loop.on_visibility(focused);
    }

    /// Fire a trigger on behalf of the host.
    pub fn fire(&mut self, trigger: Trigger) -> bool {
        self.world.fire(trigger)
    }

    fn drain_loads(&mut self) {
        while let Ok(loaded) = self.loads_rx.try_recv() {
            debug!("tilesets loaded: {}", loaded.ids.join(","));
            self.world
                .bus
                .publish(&GameEvent::TilesetsLoaded { ids: loaded.ids });
            let trigger = if self.world.level_requested {
                Trigger::Play
            } else {
                Trigger::Ready
            };
            if self.world.fire(trigger) {
                self.world.level_requested = false;
            } else {
                warn!(
                    "tileset load finished in phase {}, {} not applied",
                    self.phase().as_str(),
                    trigger.as_str()
                );
            }
        }
    }

    fn spawn(&mut self, kind: EntityKind, init: &EntityInit) -> EntityHandle {
        let handle = self.world.pool.create(kind, Some(init));
        if let Some(entity) = self.world.pool.get(handle) {
            self.renderer.add_entity(entity);
        }
        self.world
            .bus
            .publish(&GameEvent::EntitySpawned { handle, kind });
        handle
    }

    fn footprint(&self, kind: EntityKind) -> (f64, f64) {
        self.world
            .pool
            .registry()
            .template(kind)
            .map_or((0.0, 0.0), |t| {
                (self.sizer.scale(t.width), self.sizer.scale(t.height))
            })
    }

    /// Lay out a fresh level and start loading it.
    fn start_level(&mut self) {
        // Stale corpses from older rounds go for good; last round's cast is
        // buried so the new level reuses it.
        self.world.pool.cremate();
        let previous: Vec<EntityHandle> = self.world.pool.handles().to_vec();
        for handle in previous {
            self.world.pool.remove(handle);
            self.world.bus.publish(&GameEvent::EntityRemoved { handle });
        }
        self.world.player = None;
        self.world.steering.clear();

        let (width, height) = (self.sizer.width(), self.sizer.height());

        let (pw, ph) = self.footprint(EntityKind::Player);
        let player_at = EntityInit::at(((width - pw) / 2.0).max(0.0), (height - ph).max(0.0));
        self.world.player = Some(self.spawn(EntityKind::Player, &player_at));

        let (nw, nh) = self.footprint(EntityKind::Npc);
        for i in 0..self.npcs {
            let slot = f64::from(i + 1) / f64::from(self.npcs + 1);
            let at = EntityInit::at((width * slot - nw / 2.0).max(0.0), (height - nh).max(0.0));
            self.spawn(EntityKind::Npc, &at);
        }

        self.world.level_requested = true;
        self.world.fire(Trigger::Load);
        let tilesets = tilesets_of(self.world.pool.all());
        self.renderer.load_tilesets(&tilesets, self.loads_tx.clone());
        info!("level started with {} entities", self.world.pool.len());
    }

    fn simulate(&mut self, runtime: Duration, loop_ctx: LoopSnapshot) {
        let sizer = &self.sizer;
        self.world.pool.for_each_mut(|_, entity| {
            step(entity, sizer);
        });

        if !self.world.debug {
            return;
        }
        if let Some(player) = self.world.player() {
            let frame = TelemetryFrame {
                entity: player,
                input: self.input.snapshot(),
                runtime,
                fps: loop_ctx.fps,
                loop_ctx,
            };
            self.telemetry.observe(&frame);
        }
    }
}

impl<R: Renderer, S: Sizer> LoopHandler for Session<R, S> {
    fn update(&mut self, runtime: Duration, loop_ctx: LoopSnapshot) {
        self.input.pump(&mut self.world);
        self.drain_loads();

        match self.world.fsm.current() {
            Phase::Starting => self.start_level(),
            Phase::Playing => self.simulate(runtime, loop_ctx),
            _ => {}
        }
    }

    fn render(&mut self, runtime: Duration) {
        let phase = self.world.fsm.current();
        let entities: Vec<&Entity> = self.world.pool.all().collect();
        self.renderer.render(runtime, phase, &entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::GameTopic;
    use crate::render::HeadlessRenderer;
    use crate::types::Direction;
    use grandpa_core::FixedSizer;
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestSession = Session<HeadlessRenderer, FixedSizer>;

    fn session() -> TestSession {
        let config = GameConfig {
            level: crate::config::LevelConfig { npcs: 2 },
            ..GameConfig::default()
        };
        Session::new(&config, FixedSizer::new(640.0, 360.0), HeadlessRenderer::default()).unwrap()
    }

    const LOOP: LoopSnapshot = LoopSnapshot {
        running: true,
        ticks: 0,
        fps: 60.0,
    };

    fn tick(s: &mut TestSession) {
        s.update(Duration::ZERO, LOOP);
        s.render(Duration::ZERO);
    }

    fn press(s: &mut TestSession, action: Action) {
        s.input.dispatch(action, Edge::Press, &mut s.world);
    }

    fn release(s: &mut TestSession, action: Action) {
        s.input.dispatch(action, Edge::Release, &mut s.world);
    }

    fn playing() -> TestSession {
        let mut s = session();
        tick(&mut s); // boot load -> menu
        press(&mut s, Action::Menu); // -> starting
        tick(&mut s); // level -> loading
        tick(&mut s); // level load -> playing
        assert_eq!(s.phase(), Phase::Playing);
        s
    }

    #[test]
    fn boots_into_menu_once_tilesets_load() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::Loading);
        assert_eq!(s.renderer().loaded, vec!["blank".to_string()]);
        tick(&mut s);
        assert_eq!(s.phase(), Phase::Menu);
        assert_eq!(s.renderer().last_phase, Some(Phase::Menu));
    }

    #[test]
    fn starting_builds_level_and_loads_it() {
        let mut s = session();
        tick(&mut s);
        press(&mut s, Action::Jump);
        assert_eq!(s.phase(), Phase::Starting);

        tick(&mut s);
        assert_eq!(s.phase(), Phase::Loading);
        assert_eq!(s.world().pool().len(), 3);
        assert_eq!(s.renderer().added, 3);
        let player = s.world().player().unwrap();
        assert_eq!(player.y, 360.0 - 67.0);

        tick(&mut s);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.renderer().last_entities, 3);
        assert_eq!(s.renderer().loads, 2);
        assert_eq!(s.renderer().loaded, vec!["blank".to_string()]);
    }

    #[test]
    fn jump_only_works_while_playing() {
        let mut s = session();
        press(&mut s, Action::Jump);
        assert_eq!(s.phase(), Phase::Loading);

        let mut s = playing();
        press(&mut s, Action::Jump);
        assert_eq!(s.world().player().unwrap().movement.jumping, JUMP_COOLDOWN_TICKS);

        // Already airborne: a second press does not restart the jump.
        tick(&mut s);
        press(&mut s, Action::Jump);
        assert_eq!(
            s.world().player().unwrap().movement.jumping,
            JUMP_COOLDOWN_TICKS - 1
        );
    }

    #[test]
    fn steering_moves_the_player_and_crouch_blocks_it() {
        let mut s = playing();
        let start_x = s.world().player().unwrap().x;

        press(&mut s, Action::MoveRight);
        press(&mut s, Action::MoveUp);
        assert_eq!(
            s.world().player().unwrap().movement.moving,
            Some(Direction::UpRight)
        );
        tick(&mut s);
        assert_eq!(s.world().player().unwrap().x, start_x + 5.0);

        press(&mut s, Action::Crouch);
        assert_eq!(s.world().player().unwrap().movement.moving, None);
        tick(&mut s);
        assert_eq!(s.world().player().unwrap().x, start_x + 5.0);

        release(&mut s, Action::Crouch);
        release(&mut s, Action::MoveUp);
        assert_eq!(
            s.world().player().unwrap().movement.moving,
            Some(Direction::Right)
        );
    }

    #[test]
    fn running_scales_speed() {
        let mut s = playing();
        let start_x = s.world().player().unwrap().x;
        press(&mut s, Action::Run);
        press(&mut s, Action::MoveLeft);
        tick(&mut s);
        assert_eq!(s.world().player().unwrap().x, start_x - 9.0);
    }

    #[test]
    fn menu_toggles_help_and_resume() {
        let mut s = playing();
        press(&mut s, Action::MoveLeft);
        press(&mut s, Action::Menu);
        assert_eq!(s.phase(), Phase::Help);
        assert_eq!(s.world().player().unwrap().movement.moving, None);

        press(&mut s, Action::Menu);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn attacks_and_debug_are_published() {
        let mut s = playing();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for topic in [GameTopic::Combat, GameTopic::Debug] {
            let seen = Rc::clone(&seen);
            s.world_mut()
                .bus_mut()
                .subscribe(topic, move |ev| seen.borrow_mut().push(ev.clone()));
        }

        press(&mut s, Action::Punch);
        release(&mut s, Action::Punch);
        press(&mut s, Action::Kick);
        press(&mut s, Action::Debug);

        let player = s.world().player_handle().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                GameEvent::Attack {
                    attacker: player,
                    kind: AttackKind::Punch
                },
                GameEvent::Attack {
                    attacker: player,
                    kind: AttackKind::Kick
                },
                GameEvent::DebugToggled(true),
            ]
        );
    }

    #[test]
    fn telemetry_runs_only_in_debug() {
        struct Count(Rc<RefCell<u32>>);
        impl Telemetry for Count {
            fn observe(&mut self, _frame: &TelemetryFrame<'_>) {
                *self.0.borrow_mut() += 1;
            }
        }

        let count = Rc::new(RefCell::new(0));
        let mut s = playing().with_telemetry(Count(Rc::clone(&count)));
        tick(&mut s);
        assert_eq!(*count.borrow(), 0);

        press(&mut s, Action::Debug);
        tick(&mut s);
        tick(&mut s);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn telemetry_reports_the_driving_loop() {
        use crate::game_loop::ManualClock;

        struct Last(Rc<RefCell<Option<LoopSnapshot>>>);
        impl Telemetry for Last {
            fn observe(&mut self, frame: &TelemetryFrame<'_>) {
                *self.0.borrow_mut() = Some(frame.loop_ctx);
            }
        }

        let last = Rc::new(RefCell::new(None));
        let mut s = playing().with_telemetry(Last(Rc::clone(&last)));
        press(&mut s, Action::Debug);

        let clock = ManualClock::new();
        let mut lp = GameLoop::new(clock.clone(), 60);
        lp.start();
        for _ in 0..3 {
            lp.advance(&mut s);
            clock.advance(Duration::from_millis(20));
        }
        assert_eq!(*last.borrow(), Some(lp.snapshot()));
        assert_eq!(lp.snapshot().ticks, 3);
    }

    #[test]
    fn next_round_reuses_buried_entities() {
        let mut s = playing();
        let first: Vec<u32> = {
            let mut h: Vec<u32> = s
                .world_mut()
                .pool_mut()
                .handles()
                .iter()
                .map(|h| h.slot())
                .collect();
            h.sort();
            h
        };

        assert!(s.fire(Trigger::Lose));
        press(&mut s, Action::Menu); // lost -> menu
        press(&mut s, Action::Menu); // menu -> starting
        tick(&mut s);
        tick(&mut s);
        assert_eq!(s.phase(), Phase::Playing);

        let mut second: Vec<u32> = s
            .world_mut()
            .pool_mut()
            .handles()
            .iter()
            .map(|h| h.slot())
            .collect();
        second.sort();
        assert_eq!(first, second);
        assert_eq!(s.world().pool().graveyard_len(EntityKind::Npc), 0);
        assert_eq!(s.renderer().loads, 3);
        assert_eq!(s.renderer().loaded, vec!["blank".to_string()]);
    }

    #[test]
    fn focus_loss_pauses_loop_and_drops_input() {
        use crate::game_loop::ManualClock;

        let mut s = playing();
        let mut lp = GameLoop::new(ManualClock::new(), 60);
        lp.start();
        press(&mut s, Action::MoveLeft);

        s.on_focus(&mut lp, false);
        assert!(!lp.is_running());
        assert!(!s.input().is_attached());
        assert_eq!(s.world().player().unwrap().movement.moving, None);

        s.on_focus(&mut lp, true);
        assert!(lp.is_running());
        assert!(s.input().is_attached());
    }

    #[test]
    fn swap_input_keeps_controls() {
        let mut s = playing();
        press(&mut s, Action::MoveLeft);
        tick(&mut s);
        assert_eq!(s.world().player().unwrap().movement.moving, Some(Direction::Left));

        s.swap_input(SourceKind::Touch);
        assert_eq!(s.input().source_kind(), SourceKind::Touch);
        assert_eq!(s.world().player().unwrap().movement.moving, None);
        let x0 = s.world().player().unwrap().x;
        for _ in 0..10 {
            tick(&mut s);
        }
        assert_eq!(s.world().player().unwrap().x, x0);

        press(&mut s, Action::Jump);
        assert!(s.world().player().unwrap().movement.is_jumping());
    }

    #[test]
    fn press_queued_before_focus_loss_is_dropped() {
        use crate::game_loop::ManualClock;
        use grandpa_input::{reverse_lookup, RawInput};

        let mut s = playing();
        let mut lp = GameLoop::new(ManualClock::new(), 60);
        lp.start();
        assert!(s.input.queue(RawInput::press(reverse_lookup("A").unwrap())));

        s.on_focus(&mut lp, false);
        s.on_focus(&mut lp, true);
        let x0 = s.world().player().unwrap().x;
        for _ in 0..10 {
            tick(&mut s);
        }
        let player = s.world().player().unwrap();
        assert_eq!(player.movement.moving, None);
        assert_eq!(player.x, x0);
    }
}
