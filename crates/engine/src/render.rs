//! Render collaborator boundary.
//!
//! The engine never draws. It hands entities to a [`Renderer`], asks it to
//! load tilesets and calls [`Renderer::render`] once per tick. Tileset loads
//! complete asynchronously from the engine's point of view: the renderer
//! sends a [`TilesetsLoaded`] message on the channel it was given, and the
//! session consumes it during its next update.

use std::sync::mpsc::Sender;
use std::time::Duration;

use grandpa_core::Entity;

use crate::types::Phase;

/// A sprite sheet the renderer should make available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    pub id: String,
    pub src: String,
}

impl Tileset {
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
        }
    }
}

/// Completion notice for one `load_tilesets` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetsLoaded {
    pub ids: Vec<String>,
}

/// Where renderers report finished tileset loads.
pub type TilesetsReady = Sender<TilesetsLoaded>;

pub trait Renderer {
    /// A new entity entered the scene.
    fn add_entity(&mut self, _entity: &Entity) {}

    /// Start loading `tilesets` and report on `ready` once they are usable.
    fn load_tilesets(&mut self, tilesets: &[Tileset], ready: TilesetsReady);

    /// Draw one frame. `entities` are in pool order.
    fn render(&mut self, runtime: Duration, phase: Phase, entities: &[&Entity]);
}

/// Renderer that draws nothing and finishes every load immediately.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub added: usize,
    pub last_phase: Option<Phase>,
    pub last_entities: usize,
    /// Load requests seen so far.
    pub loads: u64,
    /// Ids of the most recent load request only.
    pub loaded: Vec<String>,
}

impl Renderer for HeadlessRenderer {
    fn add_entity(&mut self, _entity: &Entity) {
        self.added += 1;
    }

    fn load_tilesets(&mut self, tilesets: &[Tileset], ready: TilesetsReady) {
        let ids: Vec<String> = tilesets.iter().map(|t| t.id.clone()).collect();
        self.loads += 1;
        self.loaded.clone_from(&ids);
        // The session may already be gone; nothing to report then.
        let _ = ready.send(TilesetsLoaded { ids });
    }

    fn render(&mut self, _runtime: Duration, phase: Phase, entities: &[&Entity]) {
        self.frames += 1;
        self.last_phase = Some(phase);
        self.last_entities = entities.len();
    }
}
