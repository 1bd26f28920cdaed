//! SceneView: maps the entity list and game phase into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use grandpa_core::{Entity, Role, Sizer};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::sizer::TerminalSizer;
use crate::types::Phase;

const SKY: Rgb = Rgb::new(20, 24, 40);
const GROUND: Rgb = Rgb::new(70, 50, 30);

/// Lightweight terminal view of a running session.
#[derive(Debug, Clone)]
pub struct SceneView {
    show_hud: bool,
}

impl Default for SceneView {
    fn default() -> Self {
        Self { show_hud: true }
    }
}

impl SceneView {
    pub fn new(show_hud: bool) -> Self {
        Self { show_hud }
    }

    /// Render into an existing framebuffer, resizing it to the terminal.
    pub fn render_into(
        &self,
        phase: Phase,
        entities: &[&Entity],
        sizer: &TerminalSizer,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(sizer.cols(), sizer.rows());
        fb.clear(CellStyle::new(SKY, SKY).cell(' '));
        if fb.height() == 0 {
            return;
        }

        let ground_row = i32::from(fb.height()) - 1;
        fb.fill_rect(
            0,
            ground_row,
            i32::from(fb.width()),
            1,
            CellStyle::new(Rgb::new(120, 90, 60), GROUND).cell('▀'),
        );

        if matches!(phase, Phase::Playing | Phase::Help | Phase::Won | Phase::Lost) {
            for entity in entities {
                draw_entity(fb, entity, sizer);
            }
        }

        if self.show_hud {
            self.draw_hud(fb, phase, entities);
        }
        if let Some(text) = overlay_text(phase) {
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str_centered(i32::from(fb.height()) / 2, text, style);
        }
    }

    pub fn render(&self, phase: Phase, entities: &[&Entity], sizer: &TerminalSizer) -> FrameBuffer {
        let mut fb = FrameBuffer::new(sizer.cols(), sizer.rows());
        self.render_into(phase, entities, sizer, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, phase: Phase, entities: &[&Entity]) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), SKY).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SKY);

        fb.put_str(1, 0, &phase.as_str().to_uppercase(), label);
        let player = entities.iter().find_map(|e| match &e.role {
            Role::Player(p) => Some(p),
            Role::Npc(_) => None,
        });
        if let Some(p) = player {
            let text = format!("{} HP {}", p.name, p.hp);
            let x = i32::from(fb.width()) - text.chars().count() as i32 - 1;
            fb.put_str(x, 0, &text, value);
        }
    }
}

fn draw_entity(fb: &mut FrameBuffer, entity: &Entity, sizer: &TerminalSizer) {
    let (style, ch) = match &entity.role {
        Role::Player(_) => (CellStyle::new(Rgb::new(240, 220, 80), SKY).bold(), '@'),
        Role::Npc(_) => (CellStyle::new(Rgb::new(100, 160, 240), SKY), 'n'),
    };

    let (x, mut y) = sizer.to_cell(entity.x, entity.y);
    let (w, mut h) = sizer.to_cells(sizer.scale(entity.width), sizer.scale(entity.height));
    if entity.player().is_some_and(|p| p.crouching) && h > 1 {
        let crouched = (h + 1) / 2;
        y += h - crouched;
        h = crouched;
    }
    if entity.movement.is_jumping() {
        y -= 1;
    }
    fb.fill_rect(x, y, w, h, style.cell(ch));
}

fn overlay_text(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Loading => Some("LOADING..."),
        Phase::Menu => Some("NUMBER ONE GRANDPA  -  press SPACE"),
        Phase::Starting => Some("GET READY"),
        Phase::Help => Some("PAUSED  -  ESC to resume"),
        Phase::Lost => Some("GAME OVER  -  press SPACE"),
        Phase::Won => Some("YOU WIN  -  press SPACE"),
        Phase::Playing => None,
    }
}
