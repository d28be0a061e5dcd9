// Configuration loader
// Loads settings from config.yaml (or a .toml file), falling back to defaults

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::CrewError;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No settings file existed; built-in defaults are in effect
    Defaults,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

impl LoadedConfig {
    pub fn used_defaults(&self) -> bool {
        self.source == ConfigSource::Defaults
    }
}

/// Load configuration from `path`.
///
/// A missing file is not an error: the default record is returned and a
/// warning is logged. A file that exists but does not parse or validate is.
pub fn load_config(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        tracing::warn!("{} not found, using default configuration", path.display());
        return Ok(LoadedConfig {
            config: Config::default(),
            source: ConfigSource::Defaults,
        });
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let config: Config = parse_document(path, &contents)?;
    config
        .validate()
        .with_context(|| format!("Configuration validation failed for {}", path.display()))?;

    tracing::debug!("Loaded configuration from {}: {:?}", path.display(), config);

    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

/// Parse a key-value document, choosing TOML or YAML by file extension.
///
/// `.toml` files are parsed as TOML; everything else as YAML.
pub fn parse_document<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T, CrewError> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        toml::from_str(contents).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| CrewError::ConfigParse {
        path: path.to_path_buf(),
        reason,
    })
}
