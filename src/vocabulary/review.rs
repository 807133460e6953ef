//! Review selection and answer recording
//!
//! Everything here is pure: callers pass in the items, records and progress
//! they loaded, and persist whatever comes back.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::algorithm::apply_answer;
use super::models::{ProgressSummary, SchedulingRecord, VocabularyItem};
use super::progress::apply_to_progress;

/// Key scheduling records by item id
pub fn index_records(records: Vec<SchedulingRecord>) -> HashMap<String, SchedulingRecord> {
    records
        .into_iter()
        .map(|r| (r.item_id.clone(), r))
        .collect()
}

/// Items due for review at `now`, in random order
///
/// An item is due when it has no record or its next review is not after `now`.
/// Every call reshuffles.
pub fn select_due_items<R: Rng + ?Sized>(
    items: &[VocabularyItem],
    records: &HashMap<String, SchedulingRecord>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<VocabularyItem> {
    let mut due: Vec<VocabularyItem> = items
        .iter()
        .filter(|item| records.get(&item.id).map_or(true, |r| r.is_due(now)))
        .cloned()
        .collect();

    due.shuffle(rng);
    due
}

/// Never-answered items, oldest first, at most `limit`
pub fn select_new_items(
    items: &[VocabularyItem],
    records: &HashMap<String, SchedulingRecord>,
    limit: usize,
) -> Vec<VocabularyItem> {
    let mut fresh: Vec<VocabularyItem> = items
        .iter()
        .filter(|item| !records.contains_key(&item.id))
        .cloned()
        .collect();

    fresh.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    fresh.truncate(limit);
    fresh
}

/// Record an answer for `item`
///
/// Returns the updated scheduling record and progress summary. The streak
/// uses the calendar date of `now` in its own time zone, so pass a local
/// time to count days the way the learner sees them.
pub fn record_answer<Tz: TimeZone>(
    item: &VocabularyItem,
    correct: bool,
    now: &DateTime<Tz>,
    record: Option<&SchedulingRecord>,
    progress: Option<&ProgressSummary>,
) -> (SchedulingRecord, ProgressSummary) {
    let updated_record = apply_answer(record, &item.id, correct, now.with_timezone(&Utc));
    let updated_progress = apply_to_progress(progress, correct, now.date_naive());

    (updated_record, updated_progress)
}

/// A queue of items worked through one at a time
///
/// Answering does not move the queue; the caller calls [`ReviewSession::advance`]
/// when it is ready for the next item.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    items: Vec<VocabularyItem>,
    position: usize,
}

impl ReviewSession {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self { items, position: 0 }
    }

    /// The item currently presented, `None` once the session is finished
    pub fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.position)
    }

    /// Move to the next item and return it
    pub fn advance(&mut self) -> Option<&VocabularyItem> {
        if self.position < self.items.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Zero-based index of the current item
    pub fn position(&self) -> usize {
        self.position
    }

    /// Items not yet advanced past, including the current one
    pub fn remaining(&self) -> usize {
        self.items.len() - self.position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.items.len()
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }
}
