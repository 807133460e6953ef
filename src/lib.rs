pub mod config;
pub mod vocabulary;

pub use config::StudyConfig;
pub use vocabulary::{
    ItemStore, JsonFileStore, ProgressSummary, SchedulingRecord, StudyCoordinator,
    VocabularyItem,
};
