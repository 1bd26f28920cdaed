//! Terminal implementation of the engine's render collaborator.

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::Result;
use log::{debug, error};

use grandpa_core::Entity;
use grandpa_engine::{Renderer, Tileset, TilesetsLoaded, TilesetsReady};

use crate::fb::FrameBuffer;
use crate::scene::SceneView;
use crate::screen::TerminalScreen;
use crate::sizer::TerminalSizer;
use crate::types::Phase;

/// Draws the session into the terminal.
///
/// Glyph art needs no decoding, so tileset loads complete on request. Output
/// errors cannot travel through [`Renderer::render`]; the first one is kept
/// for the host loop to pick up with [`TerminalHost::take_error`].
pub struct TerminalHost {
    screen: TerminalScreen,
    view: SceneView,
    sizer: TerminalSizer,
    fb: FrameBuffer,
    tilesets: BTreeSet<String>,
    error: Option<anyhow::Error>,
}

impl TerminalHost {
    pub fn new(sizer: TerminalSizer) -> Self {
        Self {
            screen: TerminalScreen::new(),
            view: SceneView::default(),
            fb: FrameBuffer::new(sizer.cols(), sizer.rows()),
            sizer,
            tilesets: BTreeSet::new(),
            error: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.screen.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.screen.exit()
    }

    pub fn reports_key_releases(&self) -> bool {
        self.screen.reports_key_releases()
    }

    pub fn sizer(&self) -> &TerminalSizer {
        &self.sizer
    }

    /// Follow a terminal resize; the next frame is a full redraw.
    pub fn resize(&mut self, sizer: TerminalSizer) {
        self.sizer = sizer;
        self.screen.invalidate();
    }

    pub fn loaded_tilesets(&self) -> impl Iterator<Item = &str> {
        self.tilesets.iter().map(String::as_str)
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }
}

impl Renderer for TerminalHost {
    fn add_entity(&mut self, entity: &Entity) {
        debug!(
            "scene: {} at ({:.0},{:.0})",
            entity.kind().as_str(),
            entity.x,
            entity.y
        );
    }

    fn load_tilesets(&mut self, tilesets: &[Tileset], ready: TilesetsReady) {
        let ids: Vec<String> = tilesets.iter().map(|t| t.id.clone()).collect();
        self.tilesets.extend(ids.iter().cloned());
        if ready.send(TilesetsLoaded { ids }).is_err() {
            debug!("tileset completion dropped: session gone");
        }
    }

    fn render(&mut self, _runtime: Duration, phase: Phase, entities: &[&Entity]) {
        self.view
            .render_into(phase, entities, &self.sizer, &mut self.fb);
        if let Err(err) = self.screen.present(&mut self.fb) {
            error!("terminal write failed: {err:#}");
            self.error.get_or_insert(err);
        }
    }
}
