use std::path::PathBuf;

use anyhow::{Context, Result};

use wordwise_lib::vocabulary::JsonFileStore;
use wordwise_lib::{StudyConfig, StudyCoordinator};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: StudyConfig,
    pub coordinator: StudyCoordinator<JsonFileStore>,
}

impl App {
    /// Open the store in `data_dir`, or the default data directory
    pub fn new(data_dir: Option<PathBuf>, seed: Option<u64>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => JsonFileStore::default_data_dir().context("Failed to get data directory")?,
        };

        let config = StudyConfig::load(&data_dir)
            .with_context(|| format!("Failed to read config in {}", data_dir.display()))?;

        let store = JsonFileStore::new(data_dir.clone());
        store
            .init()
            .with_context(|| format!("Failed to initialize storage in {}", data_dir.display()))?;

        let coordinator = match seed.or(config.seed) {
            Some(seed) => StudyCoordinator::with_seed(store, seed),
            None => StudyCoordinator::new(store),
        };

        log::debug!("Using data directory {}", data_dir.display());

        Ok(Self {
            data_dir,
            config,
            coordinator,
        })
    }

    pub fn store(&self) -> &JsonFileStore {
        self.coordinator.store()
    }
}
