//! Terminal runner (default binary).
//!
//! Drives a game session with crossterm for input and the framebuffer-based
//! terminal host for output. Logs go to a file (`GRANDPA_LOG_FILE`, default
//! `grandpa.log`) so they never corrupt the alternate screen.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use log::info;

use grandpa::engine::{GameConfig, GameLoop, MonotonicClock, Session};
use grandpa::input::{should_quit, HostEvent, TouchEvent, TouchPhase};
use grandpa::term::{KeyHold, TerminalHost, TerminalSizer};

/// How long to wait for input while the loop is paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

type TermSession = Session<TerminalHost, TerminalSizer>;

fn init_logging() -> Result<()> {
    let path = std::env::var("GRANDPA_LOG_FILE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "grandpa.log".to_string());
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let config = GameConfig::from_env().context("loading configuration")?;

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let sizer = TerminalSizer::new(
        config.viewport.design_width,
        config.viewport.design_height,
        cols,
        rows,
    );
    let mut session = Session::new(&config, sizer, TerminalHost::new(sizer))
        .context("building game session")?;

    session.renderer_mut().enter()?;
    let result = run(&mut session, config.game_loop.target_fps);

    // Always try to restore terminal state.
    let _ = session.renderer_mut().exit();
    info!("bye");
    result
}

fn run(session: &mut TermSession, target_fps: u32) -> Result<()> {
    let mut game_loop = GameLoop::new(MonotonicClock::new(), target_fps);
    game_loop.start();

    // Without release reporting, holds are inferred from auto-repeat.
    let mut hold = (!session.renderer().reports_key_releases()).then(KeyHold::default);

    loop {
        let mut timeout = game_loop.time_until_next_tick().unwrap_or(IDLE_POLL);
        if let Some(next) = hold.as_ref().and_then(|h| h.next_expiry(Instant::now())) {
            timeout = timeout.min(next);
        }

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    let forward = match (&mut hold, key.kind) {
                        (Some(h), KeyEventKind::Press | KeyEventKind::Repeat) => {
                            h.press(key.code, Instant::now())
                        }
                        _ => true,
                    };
                    if forward {
                        session.handle(&HostEvent::Key(key));
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(touch) = touch_from_mouse(mouse, session.sizer()) {
                        session.handle(&HostEvent::Touch(touch));
                    }
                }
                Event::FocusGained => session.on_focus(&mut game_loop, true),
                Event::FocusLost => {
                    if let Some(h) = hold.as_mut() {
                        h.clear();
                    }
                    session.on_focus(&mut game_loop, false);
                }
                Event::Resize(cols, rows) => {
                    session.sizer_mut().resize_cells(cols, rows);
                    let sizer = *session.sizer();
                    session.renderer_mut().resize(sizer);
                }
                _ => {}
            }
        }

        if let Some(h) = hold.as_mut() {
            for code in h.expire(Instant::now()) {
                let release = KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release);
                session.handle(&HostEvent::Key(release));
            }
        }

        game_loop.advance(session);
        if let Some(err) = session.renderer_mut().take_error() {
            return Err(err.context("drawing frame"));
        }
    }
}

/// Mouse buttons stand in for touches on the terminal.
fn touch_from_mouse(mouse: MouseEvent, sizer: &TerminalSizer) -> Option<TouchEvent> {
    let phase = match mouse.kind {
        MouseEventKind::Down(_) => TouchPhase::Start,
        MouseEventKind::Up(_) => TouchPhase::End,
        _ => return None,
    };
    let cols = f64::from(sizer.cols().max(1));
    let rows = f64::from(sizer.rows().max(1));
    Some(TouchEvent {
        id: 0,
        phase,
        x: (f64::from(mouse.column) + 0.5) / cols,
        y: (f64::from(mouse.row) + 0.5) / rows,
    })
}
