//! Runtime configuration.
//!
//! A JSON file (path in `GRANDPA_CONFIG`) provides the base values; a few
//! environment variables override them:
//!
//! | variable | field |
//! |---|---|
//! | `GRANDPA_INPUT` | `input.source` (`keyboard` or `touch`) |
//! | `GRANDPA_FPS` | `loop.target_fps` |
//! | `GRANDPA_DEBUG` | `debug` (`1` or `true`) |
//!
//! Every field has a default, so an empty object (or no file at all) is a
//! valid configuration.
//!
//! ```
//! use grandpa_engine::GameConfig;
//!
//! let cfg = GameConfig::from_json(r#"{ "loop": { "target_fps": 30 } }"#).unwrap();
//! assert_eq!(cfg.game_loop.target_fps, 30);
//! assert_eq!(cfg.input.source, "keyboard");
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use grandpa_input::{source_for, BindingError, Bindings, DispatcherConfig};

use crate::types::{SourceKind, DEFAULT_TARGET_FPS, DESIGN_HEIGHT, DESIGN_WIDTH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown input source `{0}`")]
    UnknownSource(String),
    #[error("invalid {source_name} binding: {error}")]
    Binding {
        source_name: String,
        #[source]
        error: BindingError,
    },
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub source: String,
    /// Source name → (input name → action name).
    pub bindings: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Keyboard.as_str().to_string(),
            bindings: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    pub target_fps: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub design_width: f64,
    pub design_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            design_width: DESIGN_WIDTH,
            design_height: DESIGN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Non-player characters spawned with each level.
    pub npcs: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { npcs: 3 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub input: InputConfig,
    #[serde(rename = "loop")]
    pub game_loop: LoopConfig,
    pub viewport: ViewportConfig,
    pub level: LevelConfig,
    pub debug: bool,
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load `GRANDPA_CONFIG` when set, then apply environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("GRANDPA_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim())?,
            _ => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply overrides read through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(source) = var("GRANDPA_INPUT") {
            let source = source.trim().to_ascii_lowercase();
            if !source.is_empty() {
                self.input.source = source;
            }
        }
        if let Some(fps) = var("GRANDPA_FPS") {
            self.game_loop.target_fps = fps
                .trim()
                .parse()
                .ok()
                .filter(|&fps: &u32| fps > 0)
                .ok_or(ConfigError::InvalidEnv {
                    var: "GRANDPA_FPS",
                    value: fps,
                })?;
        }
        if let Some(debug) = var("GRANDPA_DEBUG") {
            self.debug = parse_flag(debug.trim());
        }
        Ok(())
    }

    pub fn source_kind(&self) -> Result<SourceKind, ConfigError> {
        SourceKind::from_str(&self.input.source)
            .ok_or_else(|| ConfigError::UnknownSource(self.input.source.clone()))
    }

    /// Dispatcher options with every configured binding table resolved.
    pub fn dispatcher_config(&self) -> Result<DispatcherConfig, ConfigError> {
        let mut config = DispatcherConfig::new(self.source_kind()?);
        for (source_name, pairs) in &self.input.bindings {
            let kind = SourceKind::from_str(source_name)
                .ok_or_else(|| ConfigError::UnknownSource(source_name.clone()))?;
            let source = source_for(kind);
            let bindings = Bindings::from_strings(
                pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                |name| source.lookup(name),
            )
            .map_err(|error| ConfigError::Binding {
                source_name: source_name.clone(),
                error,
            })?;
            config = config.with_bindings(kind, bindings);
        }
        Ok(config)
    }
}
