use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Defaults for `count`, read from `config.toml` in the platform config dir.
/// Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_cpus")]
    pub cpus: usize,
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default)]
    pub discard_qc_fail: bool,
}

fn default_min_length() -> usize {
    1
}

fn default_cpus() -> usize {
    1
}

fn default_compress() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            cpus: default_cpus(),
            compress: default_compress(),
            discard_qc_fail: false,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("com", "quest", "quest-tools")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::path() {
            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(&config_path) {
                    return Self::from_toml_str(&content);
                }
            }
        }
        Config::default()
    }

    /// Parse a config document, falling back to defaults on malformed input
    pub fn from_toml_str(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config file: {}", e);
                Config::default()
            }
        }
    }
}
