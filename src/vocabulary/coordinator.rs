//! Study coordinator: connects the pure review logic to an [`ItemStore`]
//!
//! Store failures never abort a study session. Failed reads are logged and
//! treated as empty, and an answer whose stored state could not be read is
//! not saved. Failed writes are logged and handed back to the caller in
//! [`AnswerOutcome`] together with the values that should have been saved.

use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::models::{ProgressSummary, SchedulingRecord, VocabularyItem};
use super::progress::{build_overview, StudyOverview};
use super::quiz::{generate_multiple_choice_options, select_quiz_items, MultipleChoice};
use super::review::{self, index_records, select_due_items, select_new_items, ReviewSession};
use super::store::{ItemStore, Result, StoreError};

/// Result of recording one answer
#[derive(Debug)]
pub struct AnswerOutcome {
    pub record: SchedulingRecord,
    pub progress: ProgressSummary,
    /// Set when saving the record or progress failed
    pub persist_error: Option<StoreError>,
}

impl AnswerOutcome {
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

pub struct StudyCoordinator<S, R = StdRng> {
    store: S,
    rng: R,
}

impl<S: ItemStore> StudyCoordinator<S, StdRng> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Deterministic shuffling, for tests and reproducible sessions
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }
}

impl<S: ItemStore, R: Rng> StudyCoordinator<S, R> {
    pub fn with_rng(store: S, rng: R) -> Self {
        Self { store, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load_items(&self) -> Vec<VocabularyItem> {
        self.store.fetch_all_items().unwrap_or_else(|e| {
            log::warn!("Failed to load vocabulary items: {}", e);
            Vec::new()
        })
    }

    /// `None` when the read failed, so callers can tell it from "no records yet"
    fn load_records(&self) -> Option<Vec<SchedulingRecord>> {
        match self.store.fetch_all_records() {
            Ok(records) => Some(records),
            Err(e) => {
                log::warn!("Failed to load scheduling records: {}", e);
                None
            }
        }
    }

    fn load_progress(&self) -> Option<ProgressSummary> {
        self.store.fetch_progress().unwrap_or_else(|e| {
            log::warn!("Failed to load progress: {}", e);
            None
        })
    }

    /// Items due at `now`, freshly shuffled
    pub fn due_items(&mut self, now: DateTime<Utc>) -> Vec<VocabularyItem> {
        let items = self.load_items();
        if items.is_empty() {
            return Vec::new();
        }
        let Some(records) = self.load_records() else {
            return Vec::new();
        };

        let records = index_records(records);
        let due = select_due_items(&items, &records, now, &mut self.rng);
        log::debug!("{} of {} items due", due.len(), items.len());
        due
    }

    /// Start a review session over the items due at `now`
    pub fn start_review(&mut self, now: DateTime<Utc>) -> ReviewSession {
        ReviewSession::new(self.due_items(now))
    }

    /// Never-answered items, oldest first
    pub fn new_items(&self, limit: usize) -> Vec<VocabularyItem> {
        let Some(records) = self.load_records() else {
            return Vec::new();
        };
        let items = self.load_items();
        select_new_items(&items, &index_records(records), limit)
    }

    /// The item's scheduling record, `None` if never answered or unreadable
    pub fn record_for(&self, item_id: &str) -> Option<SchedulingRecord> {
        self.store.fetch_record(item_id).unwrap_or_else(|e| {
            log::warn!("Failed to load scheduling record for {}: {}", item_id, e);
            None
        })
    }

    /// Record an answer for `item` and save the results
    ///
    /// Streak days follow the calendar of `now`'s time zone. If the stored
    /// record or progress cannot be read, the outcome is computed from
    /// defaults and nothing is saved, so stored history is never replaced;
    /// the read error is returned in `persist_error` and the answer should be
    /// recorded again later rather than passed to [`Self::persist`].
    pub fn record_answer<Tz: TimeZone>(
        &mut self,
        item: &VocabularyItem,
        correct: bool,
        now: &DateTime<Tz>,
    ) -> AnswerOutcome {
        let mut read_error = None;

        let record = self.store.fetch_record(&item.id).unwrap_or_else(|e| {
            log::warn!("Failed to load scheduling record for {}: {}", item.id, e);
            read_error = Some(e);
            None
        });
        let progress = self.store.fetch_progress().unwrap_or_else(|e| {
            log::warn!("Failed to load progress: {}", e);
            read_error.get_or_insert(e);
            None
        });

        let (record, progress) =
            review::record_answer(item, correct, now, record.as_ref(), progress.as_ref());

        let mut outcome = AnswerOutcome {
            record,
            progress,
            persist_error: None,
        };

        if let Some(e) = read_error {
            log::error!("Not saving answer for {}: stored state could not be read", item.id);
            outcome.persist_error = Some(e);
        } else if let Err(e) = self.persist(&outcome) {
            outcome.persist_error = Some(e);
        }

        outcome
    }

    /// Record an answer at the current local time
    pub fn record_answer_now(&mut self, item: &VocabularyItem, correct: bool) -> AnswerOutcome {
        self.record_answer(item, correct, &Local::now())
    }

    /// Save an outcome's record and progress
    ///
    /// Called by `record_answer`; call again to retry after a failed save.
    pub fn persist(&mut self, outcome: &AnswerOutcome) -> Result<()> {
        let record_result = self.store.save_record(&outcome.record);
        if let Err(ref e) = record_result {
            log::error!(
                "Failed to save scheduling record for {}: {}",
                outcome.record.item_id,
                e
            );
        }

        let progress_result = self.store.save_progress(&outcome.progress);
        if let Err(ref e) = progress_result {
            log::error!("Failed to save progress: {}", e);
        }

        record_result.and(progress_result)
    }

    /// Answer options for a multiple choice question about `item`
    pub fn multiple_choice(&mut self, item: &VocabularyItem, option_count: usize) -> MultipleChoice {
        let items = self.load_items();
        generate_multiple_choice_options(item, &items, option_count, &mut self.rng)
    }

    /// Items for a quiz: the most recently added, shuffled
    pub fn quiz_items(&mut self, count: usize) -> Vec<VocabularyItem> {
        let items = self.load_items();
        select_quiz_items(&items, count, &mut self.rng)
    }

    /// Current progress, all zero if nothing has been answered
    pub fn progress(&self) -> ProgressSummary {
        self.load_progress().unwrap_or_default()
    }

    /// Study statistics; an unreadable record set gives an empty item overview
    pub fn overview(&self, now: DateTime<Utc>) -> StudyOverview {
        let progress = self.load_progress();
        let (items, records) = match self.load_records() {
            Some(records) => (self.load_items(), index_records(records)),
            None => (Vec::new(), HashMap::new()),
        };
        build_overview(&items, &records, progress.as_ref(), now)
    }

    /// Delete all scheduling records and progress
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset_all().map_err(|e| {
            log::error!("Failed to reset study progress: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::vocabulary::storage::JsonFileStore;
    use crate::vocabulary::store::{MemoryStore, StoreOp};
    use chrono::Duration;
    use tempfile::TempDir;

    fn item(id: &str, target: &str) -> VocabularyItem {
        let mut item = VocabularyItem::new(id.to_string(), target.to_string());
        item.id = id.to_string();
        item
    }

    fn coordinator() -> StudyCoordinator<MemoryStore> {
        let store = MemoryStore::new(vec![
            item("accomplish", "完成"),
            item("achieve", "实现"),
            item("acquire", "获得"),
            item("adapt", "适应"),
        ]);
        StudyCoordinator::with_seed(store, 11)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_all_items_due_initially() {
        let mut coordinator = coordinator();
        assert_eq!(coordinator.due_items(now()).len(), 4);
    }

    #[test]
    fn test_answered_item_leaves_due_set() {
        let mut coordinator = coordinator();
        let word = item("accomplish", "完成");

        let outcome = coordinator.record_answer(&word, true, &now());
        assert!(outcome.is_persisted());
        assert_eq!(outcome.record.repetitions, 1);
        assert_eq!(outcome.progress.total_words_studied, 1);

        let due = coordinator.due_items(now());
        assert_eq!(due.len(), 3);
        assert!(due.iter().all(|i| i.id != "accomplish"));

        // Due again once the one-day interval has passed
        let tomorrow = now() + Duration::days(1);
        assert_eq!(coordinator.due_items(tomorrow).len(), 4);
    }

    #[test]
    fn test_answers_accumulate_through_store() {
        let mut coordinator = coordinator();
        let word = item("achieve", "实现");

        coordinator.record_answer(&word, true, &now());
        let outcome = coordinator.record_answer(&word, true, &(now() + Duration::days(1)));

        assert_eq!(outcome.record.repetitions, 2);
        assert_eq!(outcome.record.interval, 6);
        assert_eq!(outcome.progress.total_words_studied, 2);
        assert_eq!(outcome.progress.streak_days, 2);
        assert_eq!(coordinator.progress(), outcome.progress);
    }

    #[test]
    fn test_review_session_walkthrough() {
        let mut coordinator = coordinator();
        let mut session = coordinator.start_review(now());
        assert_eq!(session.len(), 4);

        let mut answered = 0;
        while let Some(current) = session.current().cloned() {
            coordinator.record_answer(&current, answered % 2 == 0, &now());
            answered += 1;
            session.advance();
        }

        assert_eq!(answered, 4);
        let progress = coordinator.progress();
        assert_eq!(progress.total_correct, 2);
        assert_eq!(progress.total_incorrect, 2);
        assert_eq!(progress.accuracy, 0.5);

        // Every answered item is scheduled at least a day out
        assert!(coordinator.due_items(now()).is_empty());
    }

    #[test]
    fn test_failed_reads_are_treated_as_empty() {
        let mut coordinator = coordinator();
        coordinator.store_mut().set_unavailable(true);

        assert!(coordinator.due_items(now()).is_empty());
        assert!(coordinator.new_items(10).is_empty());
        assert_eq!(coordinator.progress(), ProgressSummary::default());
        assert_eq!(coordinator.overview(now()).total_items, 0);
    }

    #[test]
    fn test_failed_records_read_means_nothing_due() {
        let mut coordinator = coordinator();
        coordinator.record_answer(&item("accomplish", "完成"), true, &now());
        coordinator.record_answer(&item("achieve", "实现"), false, &now());
        assert_eq!(coordinator.due_items(now()).len(), 2);

        coordinator.store_mut().set_failing(StoreOp::FetchRecords, true);

        assert!(coordinator.due_items(now()).is_empty());
        assert!(coordinator.start_review(now()).is_empty());
        assert!(coordinator.new_items(10).is_empty());

        let overview = coordinator.overview(now());
        assert_eq!(overview.total_items, 0);
        assert_eq!(overview.new_items, 0);
        assert_eq!(overview.progress.total_words_studied, 2);

        coordinator.store_mut().set_failing(StoreOp::FetchRecords, false);
        assert_eq!(coordinator.due_items(now()).len(), 2);
    }

    #[test]
    fn test_failed_progress_read_keeps_stored_history() {
        let mut coordinator = coordinator();
        let word = item("accomplish", "完成");
        for day in 0..5 {
            coordinator.record_answer(&word, true, &(now() + Duration::days(day)));
        }
        let before = coordinator.progress();
        assert_eq!(before.total_words_studied, 5);
        assert_eq!(before.streak_days, 5);

        coordinator.store_mut().set_failing(StoreOp::FetchProgress, true);
        let outcome = coordinator.record_answer(&word, true, &(now() + Duration::days(5)));

        assert!(!outcome.is_persisted());
        assert!(matches!(outcome.persist_error, Some(StoreError::Unavailable(_))));
        assert_eq!(outcome.progress.total_words_studied, 1);

        coordinator.store_mut().set_failing(StoreOp::FetchProgress, false);
        assert_eq!(coordinator.progress(), before);
        assert_eq!(coordinator.record_for("accomplish").unwrap().repetitions, 5);
    }

    #[test]
    fn test_failed_record_read_keeps_stored_record() {
        let mut coordinator = coordinator();
        let word = item("acquire", "获得");
        coordinator.record_answer(&word, true, &now());
        let outcome = coordinator.record_answer(&word, true, &(now() + Duration::days(1)));
        assert_eq!(outcome.record.interval, 6);

        coordinator.store_mut().set_failing(StoreOp::FetchRecords, true);
        let outcome = coordinator.record_answer(&word, false, &(now() + Duration::days(7)));
        assert!(!outcome.is_persisted());

        coordinator.store_mut().set_failing(StoreOp::FetchRecords, false);
        let stored = coordinator.record_for("acquire").unwrap();
        assert_eq!(stored.repetitions, 2);
        assert_eq!(stored.interval, 6);
        assert_eq!(coordinator.progress().total_words_studied, 2);
    }

    #[test]
    fn test_corrupt_files_do_not_reset_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        store
            .import_items(vec![item("a", "一"), item("b", "二")])
            .unwrap();
        let mut coordinator = StudyCoordinator::with_seed(store, 3);

        for day in 0..5 {
            let at = now() + Duration::days(day);
            coordinator.record_answer(&item("a", "一"), true, &at);
            coordinator.record_answer(&item("b", "二"), true, &at);
        }
        let at = now() + Duration::days(4);
        assert!(coordinator.due_items(at).is_empty());

        let base = temp_dir.path();
        fs::write(base.join("records").join("zz.json"), "{broken").unwrap();
        assert!(coordinator.due_items(at).is_empty());

        fs::remove_file(base.join("records").join("zz.json")).unwrap();
        let saved_progress = fs::read_to_string(base.join("progress.json")).unwrap();
        fs::write(base.join("progress.json"), "{broken").unwrap();

        let outcome = coordinator.record_answer(&item("a", "一"), true, &(now() + Duration::days(5)));
        assert!(!outcome.is_persisted());
        assert_eq!(coordinator.record_for("a").unwrap().repetitions, 5);

        fs::write(base.join("progress.json"), &saved_progress).unwrap();
        let progress = coordinator.progress();
        assert_eq!(progress.total_words_studied, 10);
        assert_eq!(progress.streak_days, 5);
    }

    #[test]
    fn test_failed_write_returns_computed_values() {
        let mut coordinator = coordinator();
        let word = item("adapt", "适应");
        coordinator.store_mut().set_failing(StoreOp::SaveRecord, true);
        coordinator.store_mut().set_failing(StoreOp::SaveProgress, true);

        let outcome = coordinator.record_answer(&word, false, &now());

        assert!(!outcome.is_persisted());
        assert!(matches!(outcome.persist_error, Some(StoreError::Unavailable(_))));
        assert_eq!(outcome.record.incorrect_count, 1);
        assert_eq!(outcome.progress.total_incorrect, 1);

        // Retry once the store is back
        coordinator.store_mut().set_failing(StoreOp::SaveRecord, false);
        coordinator.store_mut().set_failing(StoreOp::SaveProgress, false);
        coordinator.persist(&outcome).unwrap();
        assert_eq!(coordinator.store().fetch_record("adapt").unwrap(), Some(outcome.record));
    }

    #[test]
    fn test_new_items_excludes_answered() {
        let mut coordinator = coordinator();
        coordinator.record_answer(&item("acquire", "获得"), true, &now());

        let fresh = coordinator.new_items(10);
        assert_eq!(fresh.len(), 3);
        assert!(fresh.iter().all(|i| i.id != "acquire"));
    }

    #[test]
    fn test_multiple_choice_from_store() {
        let mut coordinator = coordinator();
        let word = item("accomplish", "完成");

        let choice = coordinator.multiple_choice(&word, 4);

        assert_eq!(choice.options.len(), 4);
        assert_eq!(choice.correct_answer(), "完成");
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut coordinator = coordinator();
        coordinator.record_answer(&item("accomplish", "完成"), true, &now());

        coordinator.reset().unwrap();

        assert_eq!(coordinator.progress(), ProgressSummary::default());
        assert_eq!(coordinator.due_items(now()).len(), 4);
        assert_eq!(coordinator.overview(now()).studied_items, 0);
    }
}
