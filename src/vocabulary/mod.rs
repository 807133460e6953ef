//! Vocabulary study and spaced repetition for Wordwise
//!
//! This module provides:
//! - Vocabulary items and per-item scheduling records
//! - SM-2 style interval scheduling for correct/incorrect answers
//! - Due-item selection, review sessions and progress/streak tracking
//! - Multiple choice and spelling quiz helpers
//! - Storage interface with in-memory and JSON file implementations

pub mod algorithm;
pub mod coordinator;
pub mod models;
pub mod progress;
pub mod quiz;
pub mod review;
pub mod storage;
pub mod store;

pub use coordinator::{AnswerOutcome, StudyCoordinator};
pub use models::*;
pub use progress::StudyOverview;
pub use quiz::{check_spelling, MultipleChoice, QuizGrade, QuizScore};
pub use review::ReviewSession;
pub use storage::JsonFileStore;
pub use store::{ItemStore, MemoryStore, StoreError, StoreOp};
