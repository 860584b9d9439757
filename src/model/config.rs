use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from ticklist.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backing file, relative to the working directory
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Persist after every add/toggle/delete. When false, only an explicit
    /// save writes the file.
    #[serde(default = "default_true")]
    pub autosave: bool,
    /// Append unsaved or undecodable data to the recovery log
    #[serde(default = "default_true")]
    pub recovery_log: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_store_path(),
            autosave: true,
            recovery_log: true,
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("todo.json")
}

fn default_true() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    50
}

/// Light or dark palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeKind,
    /// Show the FPS / frame-time overlay at startup (toggle with F3)
    #[serde(default)]
    pub show_perf: bool,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Upper bound on how long one frame waits for input, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Hex color overrides keyed by theme slot name (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: ThemeKind::default(),
            show_perf: false,
            show_key_hints: true,
            tick_ms: default_tick_ms(),
            colors: HashMap::new(),
        }
    }
}
