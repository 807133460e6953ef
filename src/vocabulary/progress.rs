//! Progress aggregation: answer counters, accuracy, daily streaks and the
//! study overview.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::models::{ItemStatus, ProgressSummary, SchedulingRecord, VocabularyItem};

/// Fold one answer into the progress summary
///
/// `today` is the learner's calendar day for the answer.
pub fn apply_to_progress(
    progress: Option<&ProgressSummary>,
    correct: bool,
    today: NaiveDate,
) -> ProgressSummary {
    let mut next = progress.cloned().unwrap_or_default();

    next.total_words_studied += 1;
    if correct {
        next.total_correct += 1;
    } else {
        next.total_incorrect += 1;
    }
    next.accuracy = accuracy(next.total_correct, next.total_incorrect);

    update_streak(&mut next, today);

    next
}

/// Ratio of correct answers, 0.0 when nothing has been answered
pub fn accuracy(correct: u32, incorrect: u32) -> f32 {
    let total = correct + incorrect;
    if total == 0 {
        0.0
    } else {
        correct as f32 / total as f32
    }
}

/// Update the daily streak for a study event on `today`
pub fn update_streak(progress: &mut ProgressSummary, today: NaiveDate) {
    match progress.last_study_date {
        Some(last) if last == today => return,
        Some(last) if last == today - Duration::days(1) => {
            progress.streak_days += 1;
        }
        _ => {
            progress.streak_days = 1;
        }
    }

    progress.best_streak_days = progress.best_streak_days.max(progress.streak_days);
    progress.last_study_date = Some(today);
}

/// Snapshot of how far the learner has come, for stats displays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyOverview {
    pub total_items: usize,
    /// Items with at least one recorded answer
    pub studied_items: usize,
    /// studied_items / total_items, 0.0 with no items
    pub studied_ratio: f32,
    pub due_items: usize,
    pub new_items: usize,
    pub learning_items: usize,
    pub review_items: usize,
    pub relearning_items: usize,
    /// Studied item count per category
    pub by_category: BTreeMap<String, usize>,
    pub progress: ProgressSummary,
}

/// Build a study overview from the full item and record sets
pub fn build_overview(
    items: &[VocabularyItem],
    records: &HashMap<String, SchedulingRecord>,
    progress: Option<&ProgressSummary>,
    now: DateTime<Utc>,
) -> StudyOverview {
    let mut overview = StudyOverview {
        total_items: items.len(),
        progress: progress.cloned().unwrap_or_default(),
        ..Default::default()
    };

    for item in items {
        let record = records.get(&item.id);

        match ItemStatus::of(record) {
            ItemStatus::New => overview.new_items += 1,
            ItemStatus::Learning => overview.learning_items += 1,
            ItemStatus::Review => overview.review_items += 1,
            ItemStatus::Relearning => overview.relearning_items += 1,
        }

        if record.map_or(true, |r| r.is_due(now)) {
            overview.due_items += 1;
        }

        if record.is_some() {
            overview.studied_items += 1;
            *overview
                .by_category
                .entry(item.category.clone())
                .or_insert(0) += 1;
        }
    }

    if overview.total_items > 0 {
        overview.studied_ratio = overview.studied_items as f32 / overview.total_items as f32;
    }

    overview
}
