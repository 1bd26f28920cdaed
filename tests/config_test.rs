//! Configuration files and their effect on a session

use serde_json::json;

use grandpa::core::FixedSizer;
use grandpa::engine::{ConfigError, GameConfig, HeadlessRenderer, LoopHandler, LoopSnapshot, Session};
use grandpa::input::HostEvent;
use grandpa::types::{Phase, SourceKind};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const LOOP: LoopSnapshot = LoopSnapshot {
    running: true,
    ticks: 0,
    fps: 60.0,
};

fn write_config(name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("grandpa-{}-{name}.json", std::process::id()));
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

#[test]
fn test_load_config_file() {
    let path = write_config(
        "full",
        &json!({
            "input": { "source": "keyboard", "bindings": { "keyboard": { "ENTER": "menu" } } },
            "loop": { "target_fps": 30 },
            "viewport": { "design_width": 320.0, "design_height": 180.0 },
            "debug": false
        }),
    );
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.game_loop.target_fps, 30);
    assert_eq!(config.viewport.design_height, 180.0);
    assert_eq!(config.source_kind().unwrap(), SourceKind::Keyboard);
}

#[test]
fn test_rebound_key_drives_the_session() {
    let config = GameConfig::from_json(
        &json!({ "input": { "bindings": { "keyboard": { "ENTER": "menu" } } } }).to_string(),
    )
    .unwrap();
    let mut session = Session::new(
        &config,
        FixedSizer::new(640.0, 360.0),
        HeadlessRenderer::default(),
    )
    .unwrap();
    session.update(std::time::Duration::ZERO, LOOP);
    assert_eq!(session.phase(), Phase::Menu);

    // ESC is no longer bound; ENTER replaced the whole keyboard table.
    let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    assert!(!session.handle(&HostEvent::Key(esc)));

    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    assert!(session.handle(&HostEvent::Key(enter)));
    session.update(std::time::Duration::ZERO, LOOP);
    assert_eq!(session.phase(), Phase::Loading);
}

#[test]
fn test_bad_config_is_reported() {
    let path = write_config("bad", &json!({ "loop": { "target_fps": "fast" } }));
    let err = GameConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Parse(_)));

    let config = GameConfig::from_json(
        &json!({ "input": { "bindings": { "keyboard": { "NOPE": "jump" } } } }).to_string(),
    )
    .unwrap();
    assert!(Session::new(
        &config,
        FixedSizer::new(640.0, 360.0),
        HeadlessRenderer::default()
    )
    .is_err());
}
