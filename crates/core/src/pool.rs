//! Entity pool - creates, recycles, orders and removes entities.
//!
//! Entities live in slots. A removed entity is not dropped: its slot moves to
//! a per-kind graveyard and the next `create` of that kind resets and reuses
//! it. [`EntityPool::cremate`] drops everything in the graveyard.
//!
//! Handles carry a generation, bumped whenever a slot is handed out again, so
//! a handle kept across `remove`/`create` can never reach the new occupant.

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::entity::{Entity, EntityInit, EntityRegistry};
use crate::types::EntityKind;

/// Stable reference to a pooled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    slot: u32,
    generation: u32,
}

impl EntityHandle {
    /// Storage slot backing this handle. Reused slots keep their index.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Alive,
    Buried,
    Vacant,
}

#[derive(Debug)]
struct Slot {
    entity: Option<Entity>,
    generation: u32,
    state: SlotState,
}

/// Pool of live and recyclable entities.
#[derive(Debug)]
pub struct EntityPool {
    registry: EntityRegistry,
    slots: Vec<Slot>,
    alive: Vec<EntityHandle>,
    graveyard: HashMap<EntityKind, VecDeque<u32>>,
    vacant: Vec<u32>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::with_registry(EntityRegistry::standard())
    }

    pub fn with_registry(registry: EntityRegistry) -> Self {
        let graveyard = EntityKind::ALL
            .iter()
            .map(|&kind| (kind, VecDeque::new()))
            .collect();
        Self {
            registry,
            slots: Vec::new(),
            alive: Vec::new(),
            graveyard,
            vacant: Vec::new(),
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Create an entity of `kind`, reusing a buried one when available.
    pub fn create(&mut self, kind: EntityKind, init: Option<&EntityInit>) -> EntityHandle {
        let reused = self.graveyard.get_mut(&kind).and_then(|g| g.pop_front());

        let slot = match reused {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                if let Some(entity) = slot.entity.as_mut() {
                    self.registry.reset(entity);
                }
                trace!("reusing {} slot {}", kind.as_str(), index);
                index
            }
            None => {
                let entity = self.registry.build(kind);
                match self.vacant.pop() {
                    Some(index) => {
                        self.slots[index as usize].entity = Some(entity);
                        index
                    }
                    None => {
                        self.slots.push(Slot {
                            entity: Some(entity),
                            generation: 0,
                            state: SlotState::Vacant,
                        });
                        (self.slots.len() - 1) as u32
                    }
                }
            }
        };

        let entry = &mut self.slots[slot as usize];
        entry.generation = entry.generation.wrapping_add(1);
        entry.state = SlotState::Alive;
        if let (Some(init), Some(entity)) = (init, entry.entity.as_mut()) {
            init.apply(entity);
        }

        let handle = EntityHandle {
            slot,
            generation: entry.generation,
        };
        self.alive.push(handle);
        handle
    }

    /// Move a live entity to its kind's graveyard. Unknown handles are ignored.
    pub fn remove(&mut self, handle: EntityHandle) {
        let Some(pos) = self.alive.iter().position(|&h| h == handle) else {
            trace!("remove of non-member slot {} ignored", handle.slot);
            return;
        };
        self.alive.remove(pos);

        let slot = &mut self.slots[handle.slot as usize];
        slot.state = SlotState::Buried;
        let kind = slot
            .entity
            .as_ref()
            .map(Entity::kind)
            .unwrap_or(EntityKind::Npc);
        self.graveyard
            .entry(kind)
            .or_default()
            .push_back(handle.slot);
    }

    /// Drop every buried entity so the allocator can reclaim them.
    pub fn cremate(&mut self) {
        for bucket in self.graveyard.values_mut() {
            for index in bucket.drain(..) {
                let slot = &mut self.slots[index as usize];
                slot.entity = None;
                slot.state = SlotState::Vacant;
                self.vacant.push(index);
            }
        }
    }

    fn sort_alive(&mut self) {
        let slots = &self.slots;
        let key = |h: &EntityHandle| {
            slots[h.slot as usize]
                .entity
                .as_ref()
                .map(|e| (e.x, e.y))
                .unwrap_or((0.0, 0.0))
        };
        self.alive.sort_by(|a, b| {
            let (ax, ay) = key(a);
            let (bx, by) = key(b);
            ax.total_cmp(&bx).then(ay.total_cmp(&by))
        });
    }

    /// Live handles ordered by ascending x, then ascending y.
    pub fn handles(&mut self) -> &[EntityHandle] {
        self.sort_alive();
        &self.alive
    }

    /// Live entities ordered by ascending x, then ascending y.
    ///
    /// The order is recomputed on every call.
    pub fn all(&mut self) -> impl Iterator<Item = &Entity> + '_ {
        self.sort_alive();
        let slots = &self.slots;
        self.alive
            .iter()
            .filter_map(move |h| slots[h.slot as usize].entity.as_ref())
    }

    /// Visit each live entity mutably, in creation-independent pool order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(EntityHandle, &mut Entity)) {
        self.sort_alive();
        for &handle in &self.alive {
            if let Some(entity) = self.slots[handle.slot as usize].entity.as_mut() {
                f(handle, entity);
            }
        }
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .map(|s| s.state == SlotState::Alive && s.generation == handle.generation)
            .unwrap_or(false)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        if !self.contains(handle) {
            return None;
        }
        self.slots[handle.slot as usize].entity.as_ref()
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        if !self.contains(handle) {
            return None;
        }
        self.slots[handle.slot as usize].entity.as_mut()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Number of buried entities waiting for reuse.
    pub fn graveyard_len(&self, kind: EntityKind) -> usize {
        self.graveyard.get(&kind).map(VecDeque::len).unwrap_or(0)
    }
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::player_template;
    use crate::types::Direction;

    #[test]
    fn create_remove_create_reuses_slot() {
        let mut pool = EntityPool::new();
        let a = pool.create(EntityKind::Player, None);
        pool.remove(a);
        assert_eq!(pool.graveyard_len(EntityKind::Player), 1);

        let b = pool.create(EntityKind::Player, None);
        assert_eq!(a.slot(), b.slot());
        assert_ne!(a, b);
        assert_eq!(pool.graveyard_len(EntityKind::Player), 0);
    }

    #[test]
    fn reused_entity_is_reset_then_initialized() {
        let mut pool = EntityPool::new();
        let a = pool.create(EntityKind::Player, None);
        {
            let e = pool.get_mut(a).unwrap();
            e.x = 99.0;
            e.movement.moving = Some(Direction::Left);
        }
        pool.remove(a);

        let b = pool.create(EntityKind::Player, Some(&EntityInit::at(3.0, 4.0)));
        let e = pool.get(b).unwrap();
        let mut expected = player_template();
        expected.x = 3.0;
        expected.y = 4.0;
        assert_eq!(e, &expected);
    }

    #[test]
    fn graveyard_is_per_kind() {
        let mut pool = EntityPool::new();
        let npc = pool.create(EntityKind::Npc, None);
        pool.remove(npc);
        let player = pool.create(EntityKind::Player, None);
        assert_ne!(player.slot(), npc.slot());
        assert_eq!(pool.graveyard_len(EntityKind::Npc), 1);
    }

    #[test]
    fn removing_non_member_is_noop() {
        let mut pool = EntityPool::new();
        let a = pool.create(EntityKind::Npc, None);
        pool.remove(a);
        pool.remove(a);
        assert_eq!(pool.graveyard_len(EntityKind::Npc), 1);
        assert!(pool.is_empty());

        let b = pool.create(EntityKind::Npc, None);
        // Stale handle for the same slot must not evict the new occupant.
        pool.remove(a);
        assert!(pool.contains(b));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn entity_is_alive_or_buried_never_both() {
        let mut pool = EntityPool::new();
        let handles: Vec<_> = (0..5)
            .map(|_| pool.create(EntityKind::Npc, None))
            .collect();
        pool.remove(handles[1]);
        pool.remove(handles[3]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.graveyard_len(EntityKind::Npc), 2);
        assert!(!pool.contains(handles[1]));
        assert!(pool.get(handles[3]).is_none());
    }

    #[test]
    fn all_sorts_by_x_then_y_every_call() {
        let mut pool = EntityPool::new();
        let a = pool.create(EntityKind::Npc, Some(&EntityInit::at(30.0, 0.0)));
        let b = pool.create(EntityKind::Npc, Some(&EntityInit::at(10.0, 5.0)));
        let c = pool.create(EntityKind::Npc, Some(&EntityInit::at(10.0, 1.0)));

        assert_eq!(pool.handles(), &[c, b, a]);
        let xs: Vec<(f64, f64)> = pool.all().map(|e| (e.x, e.y)).collect();
        assert_eq!(xs, vec![(10.0, 1.0), (10.0, 5.0), (30.0, 0.0)]);

        pool.get_mut(a).unwrap().x = 0.0;
        assert_eq!(pool.handles(), &[a, c, b]);
    }

    #[test]
    fn cremate_empties_graveyard_and_fresh_create_still_works() {
        let mut pool = EntityPool::new();
        let a = pool.create(EntityKind::Player, None);
        pool.get_mut(a).unwrap().x = 50.0;
        pool.remove(a);
        pool.cremate();
        assert_eq!(pool.graveyard_len(EntityKind::Player), 0);

        let b = pool.create(EntityKind::Player, None);
        assert_eq!(pool.get(b).unwrap(), &player_template());
        assert!(!pool.contains(a));
    }
}
