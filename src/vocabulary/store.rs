//! Storage interface used by the study coordinator

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::models::{ProgressSummary, SchedulingRecord, VocabularyItem};

/// Any failure to read from or write to the backing store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Backing store for vocabulary items, scheduling records and progress
///
/// A record or progress value passed to a `save_*` call must be returned by
/// the next matching fetch.
pub trait ItemStore {
    fn fetch_all_items(&self) -> Result<Vec<VocabularyItem>>;

    fn fetch_all_records(&self) -> Result<Vec<SchedulingRecord>>;

    /// `Ok(None)` when the item has never been answered
    fn fetch_record(&self, item_id: &str) -> Result<Option<SchedulingRecord>>;

    fn fetch_progress(&self) -> Result<Option<ProgressSummary>>;

    fn save_record(&mut self, record: &SchedulingRecord) -> Result<()>;

    fn save_progress(&mut self, progress: &ProgressSummary) -> Result<()>;

    /// Delete every scheduling record and the progress summary. Items stay.
    fn reset_all(&mut self) -> Result<()>;
}

/// One kind of store call, for [`MemoryStore::set_failing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    FetchItems,
    /// Both `fetch_all_records` and `fetch_record`
    FetchRecords,
    FetchProgress,
    SaveRecord,
    SaveProgress,
    Reset,
}

const ALL_OPS: [StoreOp; 6] = [
    StoreOp::FetchItems,
    StoreOp::FetchRecords,
    StoreOp::FetchProgress,
    StoreOp::SaveRecord,
    StoreOp::SaveProgress,
    StoreOp::Reset,
];

/// In-process store
///
/// `set_failing` makes one kind of call fail and `set_unavailable` makes all
/// of them fail, for exercising error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<VocabularyItem>,
    records: HashMap<String, SchedulingRecord>,
    progress: Option<ProgressSummary>,
    failing: HashSet<StoreOp>,
}

impl MemoryStore {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        for op in ALL_OPS {
            self.set_failing(op, unavailable);
        }
    }

    pub fn set_failing(&mut self, op: StoreOp, failing: bool) {
        if failing {
            self.failing.insert(op);
        } else {
            self.failing.remove(&op);
        }
    }

    pub fn add_item(&mut self, item: VocabularyItem) {
        self.items.push(item);
    }

    fn check(&self, op: StoreOp) -> Result<()> {
        if self.failing.contains(&op) {
            Err(StoreError::Unavailable(format!("{:?} failed", op)))
        } else {
            Ok(())
        }
    }
}

impl ItemStore for MemoryStore {
    fn fetch_all_items(&self) -> Result<Vec<VocabularyItem>> {
        self.check(StoreOp::FetchItems)?;
        Ok(self.items.clone())
    }

    fn fetch_all_records(&self) -> Result<Vec<SchedulingRecord>> {
        self.check(StoreOp::FetchRecords)?;
        Ok(self.records.values().cloned().collect())
    }

    fn fetch_record(&self, item_id: &str) -> Result<Option<SchedulingRecord>> {
        self.check(StoreOp::FetchRecords)?;
        Ok(self.records.get(item_id).cloned())
    }

    fn fetch_progress(&self) -> Result<Option<ProgressSummary>> {
        self.check(StoreOp::FetchProgress)?;
        Ok(self.progress.clone())
    }

    fn save_record(&mut self, record: &SchedulingRecord) -> Result<()> {
        self.check(StoreOp::SaveRecord)?;
        self.records.insert(record.item_id.clone(), record.clone());
        Ok(())
    }

    fn save_progress(&mut self, progress: &ProgressSummary) -> Result<()> {
        self.check(StoreOp::SaveProgress)?;
        self.progress = Some(progress.clone());
        Ok(())
    }

    fn reset_all(&mut self) -> Result<()> {
        self.check(StoreOp::Reset)?;
        self.records.clear();
        self.progress = None;
        Ok(())
    }
}
