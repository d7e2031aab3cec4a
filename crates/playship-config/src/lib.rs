pub mod error;
pub mod model;

pub use error::*;
pub use model::*;

use std::path::{Path, PathBuf};

/// Environment variable pointing directly at a config file
pub const CONFIG_PATH_ENV: &str = "PLAYSHIP_CONFIG";

const CANDIDATES: [&str; 4] = [
    "playship.local.yaml",
    ".playship.local.yaml",
    "playship.yaml",
    ".playship.yaml",
];

/// Global config file location (`~/.config/playship/config.yaml`)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("playship").join("config.yaml"))
}

/// Looks for a playship config file.
///
/// Search order, first match wins:
/// 1. `PLAYSHIP_CONFIG` (direct path; an error if it does not exist, ignored if blank)
/// 2. `current_dir`: playship.local.yaml, .playship.local.yaml, playship.yaml, .playship.yaml
/// 3. `~/.config/playship/config.yaml`
///
/// Returns `Ok(None)` when nothing is found; the built-in defaults then apply.
pub fn find_config_file(current_dir: &Path) -> Result<Option<PathBuf>> {
    if let Some(config_path) = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|path| !path.trim().is_empty())
    {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileNotFound(path));
    }

    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    if let Some(global_config) = global_config_path() {
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// Reads one override layer from a YAML file.
///
/// An empty (or comment-only) file is a valid, empty layer. Unknown keys
/// are ignored.
pub fn load_overrides(path: &Path) -> Result<PipelineOverrides> {
    if !path.exists() {
        return Err(ConfigError::ConfigFileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let has_content = content
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'));
    if !has_content {
        tracing::debug!("{} is empty, using defaults", path.display());
        return Ok(PipelineOverrides::default());
    }

    let overrides: PipelineOverrides =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Loaded config from {}: {:?}", path.display(), overrides);
    Ok(overrides)
}
