//! Study configuration, read from `config.toml` in the data directory

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocabulary::quiz::DEFAULT_OPTION_COUNT;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Options shown per multiple choice question
    #[serde(default = "default_option_count")]
    pub option_count: usize,
    /// New items offered by a learning session
    #[serde(default = "default_new_items_per_session")]
    pub new_items_per_session: usize,
    /// Questions per quiz
    #[serde(default = "default_quiz_length")]
    pub quiz_length: usize,
    /// Fixed random seed for reproducible shuffles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_option_count() -> usize {
    DEFAULT_OPTION_COUNT
}

fn default_new_items_per_session() -> usize {
    10
}

fn default_quiz_length() -> usize {
    10
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            option_count: default_option_count(),
            new_items_per_session: default_new_items_per_session(),
            quiz_length: default_quiz_length(),
            seed: None,
        }
    }
}

impl StudyConfig {
    /// Load `config.toml` from `data_dir`, falling back to defaults if absent
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: StudyConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        fs::write(data_dir.join(CONFIG_FILE_NAME), toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
