//! Synchronous topic-based event bus.
//!
//! One bus per session. Publishing calls each subscriber of the event's topic
//! in subscription order before returning; nothing is buffered.

use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use grandpa_core::{EntityHandle, PhaseChange};

use crate::types::EntityKind;

/// Events that know which topic they belong to.
pub trait Topic {
    type Key: Copy + Eq + Hash + std::fmt::Debug;

    fn topic(&self) -> Self::Key;
}

/// Token returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<E> = Box<dyn FnMut(&E)>;

pub struct EventBus<E: Topic> {
    next_id: u64,
    topics: HashMap<E::Key, Vec<(SubscriptionId, Subscriber<E>)>>,
}

impl<E: Topic> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            topics: HashMap::new(),
        }
    }

    pub fn subscribe(&mut self, topic: E::Key, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.topics
            .entry(topic)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Drop one subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for subscribers in self.topics.values_mut() {
            if let Some(pos) = subscribers.iter().position(|(sid, _)| *sid == id) {
                subscribers.remove(pos);
                return true;
            }
        }
        false
    }

    /// Deliver `event` to its topic's subscribers. Returns how many ran.
    pub fn publish(&mut self, event: &E) -> usize {
        let topic = event.topic();
        let Some(subscribers) = self.topics.get_mut(&topic) else {
            trace!("no subscribers for {:?}", topic);
            return 0;
        };
        for (_, callback) in subscribers.iter_mut() {
            callback(event);
        }
        subscribers.len()
    }

    /// Remove every subscriber of `topic`, or of every topic when `None`.
    pub fn clear(&mut self, topic: Option<E::Key>) {
        match topic {
            Some(topic) => {
                self.topics.remove(&topic);
            }
            None => self.topics.clear(),
        }
    }

    pub fn subscriber_count(&self, topic: E::Key) -> usize {
        self.topics.get(&topic).map_or(0, Vec::len)
    }
}

impl<E: Topic> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Topic> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("topics", &self.topics.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Punch,
    Kick,
}

/// What a game session announces.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged(PhaseChange),
    EntitySpawned { handle: EntityHandle, kind: EntityKind },
    EntityRemoved { handle: EntityHandle },
    Attack { attacker: EntityHandle, kind: AttackKind },
    DebugToggled(bool),
    TilesetsLoaded { ids: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameTopic {
    Phase,
    Entity,
    Combat,
    Debug,
    Assets,
}

impl Topic for GameEvent {
    type Key = GameTopic;

    fn topic(&self) -> GameTopic {
        match self {
            GameEvent::PhaseChanged(_) => GameTopic::Phase,
            GameEvent::EntitySpawned { .. } | GameEvent::EntityRemoved { .. } => GameTopic::Entity,
            GameEvent::Attack { .. } => GameTopic::Combat,
            GameEvent::DebugToggled(_) => GameTopic::Debug,
            GameEvent::TilesetsLoaded { .. } => GameTopic::Assets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn log_into(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> impl FnMut(&GameEvent) {
        let log = Rc::clone(log);
        move |ev: &GameEvent| log.borrow_mut().push(format!("{tag}:{:?}", ev.topic()))
    }

    #[test]
    fn delivers_in_subscription_order_to_matching_topic() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(GameTopic::Debug, log_into(&log, "a"));
        bus.subscribe(GameTopic::Debug, log_into(&log, "b"));
        bus.subscribe(GameTopic::Combat, log_into(&log, "c"));

        assert_eq!(bus.publish(&GameEvent::DebugToggled(true)), 2);
        assert_eq!(*log.borrow(), vec!["a:Debug", "b:Debug"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscriber() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let a = bus.subscribe(GameTopic::Debug, log_into(&log, "a"));
        bus.subscribe(GameTopic::Debug, log_into(&log, "b"));

        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        bus.publish(&GameEvent::DebugToggled(false));
        assert_eq!(*log.borrow(), vec!["b:Debug"]);
    }

    #[test]
    fn clear_by_topic_or_everything() {
        let mut bus: EventBus<GameEvent> = EventBus::new();
        bus.subscribe(GameTopic::Debug, |_| {});
        bus.subscribe(GameTopic::Phase, |_| {});
        bus.subscribe(GameTopic::Phase, |_| {});

        bus.clear(Some(GameTopic::Phase));
        assert_eq!(bus.subscriber_count(GameTopic::Phase), 0);
        assert_eq!(bus.subscriber_count(GameTopic::Debug), 1);

        bus.clear(None);
        assert_eq!(bus.subscriber_count(GameTopic::Debug), 0);
        assert_eq!(bus.publish(&GameEvent::DebugToggled(true)), 0);
    }
}
