//! Data models for vocabulary study

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Initial SM-2 ease factor for a never-reviewed item
pub const DEFAULT_EASE_FACTOR: f32 = 2.5;

/// Initial interval in days
pub const DEFAULT_INTERVAL: u32 = 1;

/// A vocabulary entry. Content only; scheduling lives in [`SchedulingRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    /// Word in the language being learned
    pub source_text: String,
    /// Translation shown as the answer
    pub target_text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub example: String,
    pub created_at: DateTime<Utc>,
}

impl VocabularyItem {
    pub fn new(source_text: String, target_text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_text,
            target_text,
            category: String::new(),
            difficulty: String::new(),
            example: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Where an item currently sits in the review cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemStatus {
    /// Never answered
    New,
    /// One correct answer in a row
    Learning,
    /// Two or more correct answers in a row
    Review,
    /// Last answer was wrong
    Relearning,
}

impl ItemStatus {
    pub fn of(record: Option<&SchedulingRecord>) -> Self {
        match record {
            None => Self::New,
            Some(r) => match r.repetitions {
                0 => Self::Relearning,
                1 => Self::Learning,
                _ => Self::Review,
            },
        }
    }
}

/// Spaced repetition state for one item, created on its first answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingRecord {
    pub item_id: String,
    /// SM-2 ease factor, never below 1.3
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f32,
    /// Days until the next review, never below 1
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Consecutive correct answers
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub incorrect_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
}

fn default_ease_factor() -> f32 {
    DEFAULT_EASE_FACTOR
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

impl SchedulingRecord {
    pub fn new(item_id: String) -> Self {
        Self {
            item_id,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: DEFAULT_INTERVAL,
            repetitions: 0,
            correct_count: 0,
            incorrect_count: 0,
            last_reviewed: None,
            next_review: None,
        }
    }

    /// A record without a next review date is due immediately
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            Some(next) => next <= now,
            None => true,
        }
    }

    pub fn total_answers(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }
}

/// Aggregate study progress across all items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Number of answers recorded (not distinct items)
    #[serde(default)]
    pub total_words_studied: u32,
    #[serde(default)]
    pub total_correct: u32,
    #[serde(default)]
    pub total_incorrect: u32,
    /// total_correct / (total_correct + total_incorrect), 0.0 with no answers
    #[serde(default)]
    pub accuracy: f32,
    /// Consecutive calendar days with at least one answer
    #[serde(default)]
    pub streak_days: u32,
    /// Longest streak ever reached
    #[serde(default)]
    pub best_streak_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<NaiveDate>,
}

impl ProgressSummary {
    pub fn total_answers(&self) -> u32 {
        self.total_correct + self.total_incorrect
    }
}
