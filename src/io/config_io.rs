use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Config file looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "ticklist.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the config at an explicit path. The file must exist.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read `ticklist.toml` from `dir`, falling back to defaults when it is absent.
pub fn read_config_in(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    match read_config(&path) {
        Err(ConfigError::ReadError { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(Config::default())
        }
        other => other,
    }
}

/// Resolve the config for this run: an explicit `--config` path wins, then
/// `ticklist.toml` in `cwd`.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => read_config_in(cwd),
    }
}
