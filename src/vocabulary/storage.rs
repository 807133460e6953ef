//! JSON file storage for vocabulary study data
//!
//! Directory structure:
//! ```text
//! {base}/
//! ├── items.json            # Array of all vocabulary items
//! ├── progress.json         # Aggregate progress summary
//! └── records/
//!     └── {item-id}.json    # Scheduling record per answered item
//! ```

use std::fs;
use std::path::PathBuf;

use super::models::{ProgressSummary, SchedulingRecord, VocabularyItem};
use super::store::{ItemStore, Result, StoreError};

/// File-backed [`ItemStore`]
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordwise"))
            .ok_or(StoreError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn items_path(&self) -> PathBuf {
        self.base_path.join("items.json")
    }

    fn progress_path(&self) -> PathBuf {
        self.base_path.join("progress.json")
    }

    fn records_dir(&self) -> PathBuf {
        self.base_path.join("records")
    }

    /// Get the path for an item's scheduling record
    fn record_path(&self, item_id: &str) -> PathBuf {
        self.records_dir()
            .join(format!("{}.json", file_stem(item_id)))
    }

    /// Initialize the storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.records_dir())?;

        let items_path = self.items_path();
        if !items_path.exists() {
            let empty: Vec<VocabularyItem> = Vec::new();
            fs::write(&items_path, serde_json::to_string_pretty(&empty)?)?;
        }

        Ok(())
    }

    fn write_items(&self, items: &[VocabularyItem]) -> Result<()> {
        self.init()?;
        fs::write(self.items_path(), serde_json::to_string_pretty(items)?)?;
        Ok(())
    }

    /// Add a single item
    pub fn add_item(&self, item: VocabularyItem) -> Result<()> {
        self.import_items(vec![item]).map(|_| ())
    }

    /// Merge items into the store, replacing any with the same id
    ///
    /// Returns how many ids were not present before.
    pub fn import_items(&self, incoming: Vec<VocabularyItem>) -> Result<usize> {
        let mut items = self.fetch_all_items()?;
        let mut added = 0;

        for item in incoming {
            match items.iter().position(|existing| existing.id == item.id) {
                Some(pos) => items[pos] = item,
                None => {
                    items.push(item);
                    added += 1;
                }
            }
        }

        self.write_items(&items)?;
        log::info!("Imported vocabulary: {} new, {} total", added, items.len());

        Ok(added)
    }
}

impl ItemStore for JsonFileStore {
    fn fetch_all_items(&self) -> Result<Vec<VocabularyItem>> {
        let items_path = self.items_path();
        if !items_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&items_path)?;
        let items: Vec<VocabularyItem> = serde_json::from_str(&content)?;
        Ok(items)
    }

    fn fetch_all_records(&self) -> Result<Vec<SchedulingRecord>> {
        let records_dir = self.records_dir();
        if !records_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&records_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                let record: SchedulingRecord = serde_json::from_str(&content)?;
                records.push(record);
            }
        }

        Ok(records)
    }

    fn fetch_record(&self, item_id: &str) -> Result<Option<SchedulingRecord>> {
        let record_path = self.record_path(item_id);
        if !record_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&record_path)?;
        let record: SchedulingRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn fetch_progress(&self) -> Result<Option<ProgressSummary>> {
        let progress_path = self.progress_path();
        if !progress_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&progress_path)?;
        let progress: ProgressSummary = serde_json::from_str(&content)?;
        Ok(Some(progress))
    }

    fn save_record(&mut self, record: &SchedulingRecord) -> Result<()> {
        fs::create_dir_all(self.records_dir())?;
        let record_path = self.record_path(&record.item_id);
        fs::write(&record_path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }

    fn save_progress(&mut self, progress: &ProgressSummary) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.progress_path(), serde_json::to_string_pretty(progress)?)?;
        Ok(())
    }

    fn reset_all(&mut self) -> Result<()> {
        let records_dir = self.records_dir();
        if records_dir.exists() {
            fs::remove_dir_all(&records_dir)?;
        }

        let progress_path = self.progress_path();
        if progress_path.exists() {
            fs::remove_file(&progress_path)?;
        }

        log::info!("Reset all study progress in {}", self.base_path.display());
        Ok(())
    }
}

/// Map an item id to a safe file name, escaping anything outside [A-Za-z0-9_-]
fn file_stem(item_id: &str) -> String {
    let mut stem = String::with_capacity(item_id.len());
    for byte in item_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}
