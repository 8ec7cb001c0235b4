//! Configuration for the romaji quiz.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| Self::parse(&s))
            .unwrap_or_default()
    }

    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "romaji-srs")
            .map(|d| d.config_dir().join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per bucket.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Source word groups, read-only.
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_input_file() -> PathBuf { PathBuf::from("words.json") }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            input_file: default_input_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

fn default_true() -> bool { true }
fn default_level() -> String { "info".to_string() }
fn default_log_dir() -> PathBuf { PathBuf::from("logs") }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            dir: default_log_dir(),
        }
    }
}
