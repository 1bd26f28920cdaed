//! Entity model, per-kind templates and the factory registry.
//!
//! Every entity kind has one immutable template. Construction and reset both
//! clone the template, so no two entities ever share mutable state.

use crate::movement::MovementIntent;
use crate::types::EntityKind;

/// Per-axis base speed in logical units per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    pub x: f64,
    pub y: f64,
}

impl Speed {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Tileset cell a renderer should draw for this entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetRef {
    pub id: String,
    pub src: String,
    pub x: u16,
    pub y: u16,
}

/// Physics-ish velocity state carried by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub hp: u32,
    pub name: String,
    pub velocity: Velocity,
    pub standing: u32,
    pub crouching: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcData {
    pub hp: u32,
    pub name: String,
}

/// Kind-specific state.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Player(PlayerData),
    Npc(NpcData),
}

impl Role {
    pub fn kind(&self) -> EntityKind {
        match self {
            Role::Player(_) => EntityKind::Player,
            Role::Npc(_) => EntityKind::Npc,
        }
    }
}

/// A simulated object.
///
/// `x`/`y` are viewport units; `width`, `height` and `speed` are logical
/// units that go through the sizer before they touch the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: Speed,
    pub movement: MovementIntent,
    pub tileset: TilesetRef,
    pub role: Role,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        self.role.kind()
    }

    pub fn player(&self) -> Option<&PlayerData> {
        match &self.role {
            Role::Player(p) => Some(p),
            Role::Npc(_) => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.role {
            Role::Player(p) => Some(p),
            Role::Npc(_) => None,
        }
    }
}

/// Overrides applied on top of a freshly reset entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityInit {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub speed: Option<Speed>,
    pub movement: Option<MovementIntent>,
    pub name: Option<String>,
    pub hp: Option<u32>,
}

impl EntityInit {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn apply(&self, entity: &mut Entity) {
        if let Some(x) = self.x {
            entity.x = x;
        }
        if let Some(y) = self.y {
            entity.y = y;
        }
        if let Some(speed) = self.speed {
            entity.speed = speed;
        }
        if let Some(movement) = self.movement {
            entity.movement = movement;
        }
        match &mut entity.role {
            Role::Player(p) => {
                if let Some(name) = &self.name {
                    p.name.clone_from(name);
                }
                if let Some(hp) = self.hp {
                    p.hp = hp;
                }
            }
            Role::Npc(n) => {
                if let Some(name) = &self.name {
                    n.name.clone_from(name);
                }
                if let Some(hp) = self.hp {
                    n.hp = hp;
                }
            }
        }
    }
}

fn blank_tileset(x: u16, y: u16) -> TilesetRef {
    TilesetRef {
        id: "blank".to_string(),
        src: "/assets/sprite/ryan.gif".to_string(),
        x,
        y,
    }
}

/// Default player: Gramps.
pub fn player_template() -> Entity {
    Entity {
        x: 0.0,
        y: 0.0,
        width: 36.0,
        height: 67.0,
        speed: Speed::new(5.0, 5.0),
        movement: MovementIntent::default(),
        tileset: blank_tileset(3, 2),
        role: Role::Player(PlayerData {
            hp: 100,
            name: "Gramps".to_string(),
            velocity: Velocity {
                x: 0.0,
                y: 0.0,
                max_x: 40.0,
                max_y: 30000.0,
            },
            standing: 0,
            crouching: false,
        }),
    }
}

/// Default non-player character.
pub fn npc_template() -> Entity {
    Entity {
        x: 0.0,
        y: 0.0,
        width: 30.0,
        height: 30.0,
        speed: Speed::new(3.0, 3.0),
        movement: MovementIntent::default(),
        tileset: blank_tileset(0, 0),
        role: Role::Npc(NpcData {
            hp: 30,
            name: "Stranger".to_string(),
        }),
    }
}

/// Factory for one entity kind.
pub type Factory = fn() -> Entity;

/// Immutable templates keyed by kind.
///
/// Templates are built once from each kind's factory and cloned from then on.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    templates: Vec<(EntityKind, Entity)>,
}

impl EntityRegistry {
    /// Registry over the built-in player and npc factories.
    pub fn standard() -> Self {
        Self::from_factories(&[
            (EntityKind::Player, player_template as Factory),
            (EntityKind::Npc, npc_template as Factory),
        ])
    }

    pub fn from_factories(factories: &[(EntityKind, Factory)]) -> Self {
        let templates = factories
            .iter()
            .map(|&(kind, factory)| {
                let entity = factory();
                debug_assert_eq!(entity.kind(), kind, "factory built the wrong kind");
                (kind, entity)
            })
            .collect();
        Self { templates }
    }

    pub fn template(&self, kind: EntityKind) -> Option<&Entity> {
        self.templates
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, e)| e)
    }

    /// Fresh entity of `kind`. Unregistered kinds fall back to the built-in
    /// template for that kind.
    pub fn build(&self, kind: EntityKind) -> Entity {
        match self.template(kind) {
            Some(t) => t.clone(),
            None => builtin(kind),
        }
    }

    /// Reset `entity` to its kind's template, reusing its allocations.
    pub fn reset(&self, entity: &mut Entity) {
        match self.template(entity.kind()) {
            Some(t) => entity.clone_from(t),
            None => *entity = builtin(entity.kind()),
        }
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn builtin(kind: EntityKind) -> Entity {
    match kind {
        EntityKind::Player => player_template(),
        EntityKind::Npc => npc_template(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn templates_build_their_kind() {
        let registry = EntityRegistry::standard();
        for kind in EntityKind::ALL {
            assert_eq!(registry.build(kind).kind(), kind);
        }
    }

    #[test]
    fn entities_from_same_template_do_not_share_state() {
        let registry = EntityRegistry::standard();
        let mut a = registry.build(EntityKind::Player);
        let b = registry.build(EntityKind::Player);

        a.x = 42.0;
        a.speed.x = 99.0;
        a.movement.moving = Some(Direction::Left);
        a.tileset.id.push_str("-changed");
        if let Some(p) = a.player_mut() {
            p.name.push_str(" Jr.");
            p.velocity.x = 12.0;
        }

        assert_eq!(b, player_template());
        assert_eq!(registry.build(EntityKind::Player), player_template());
    }

    #[test]
    fn reset_restores_template() {
        let registry = EntityRegistry::standard();
        let mut e = registry.build(EntityKind::Npc);
        e.y = 17.0;
        e.movement.stunned = true;
        registry.reset(&mut e);
        assert_eq!(e, npc_template());
    }

    #[test]
    fn init_overrides_only_given_fields() {
        let mut e = player_template();
        EntityInit::at(10.0, 20.0).with_name("Ryan").apply(&mut e);
        assert_eq!((e.x, e.y), (10.0, 20.0));
        assert_eq!(e.speed, Speed::new(5.0, 5.0));
        assert_eq!(e.player().map(|p| p.name.as_str()), Some("Ryan"));
    }
}
