//! SM-2 Spaced Repetition Algorithm
//!
//! A binary-answer variant of SuperMemo 2. Answers are only ever correct or
//! incorrect, so the quality-dependent ease adjustment of full SM-2 collapses
//! to a fixed step:
//! - correct: ease +0.02, interval 1 → 6 → interval × ease
//! - incorrect: ease -0.2, interval back to 1, repetitions back to 0
//!
//! The ease factor never drops below 1.3 and the interval never below 1 day.

use chrono::{DateTime, Duration, Utc};

use super::models::{SchedulingRecord, DEFAULT_INTERVAL};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f32 = 1.3;

/// Minimum interval in days
pub const MIN_INTERVAL: u32 = 1;

/// Ease change after a correct answer
const CORRECT_EASE_STEP: f32 = 0.02;

/// Ease change after an incorrect answer
const INCORRECT_EASE_STEP: f32 = -0.2;

/// Interval after the second consecutive correct answer
const SECOND_INTERVAL: u32 = 6;

/// Apply one answer to an item's scheduling record
///
/// # Arguments
/// * `record` - Current record, or `None` if the item was never answered
/// * `item_id` - Item the record belongs to (used when creating a record)
/// * `correct` - Whether the answer was correct
/// * `now` - Time of the answer
///
/// # Returns
/// The updated record. The input is not modified; persisting the result is
/// up to the caller.
pub fn apply_answer(
    record: Option<&SchedulingRecord>,
    item_id: &str,
    correct: bool,
    now: DateTime<Utc>,
) -> SchedulingRecord {
    let mut next = match record {
        Some(r) => r.clone(),
        None => SchedulingRecord::new(item_id.to_string()),
    };

    if correct {
        next.repetitions += 1;
        next.correct_count += 1;

        next.interval = match next.repetitions {
            1 => DEFAULT_INTERVAL,
            2 => SECOND_INTERVAL,
            // Uses the ease factor from before this answer
            _ => (next.interval as f32 * next.ease_factor).round() as u32,
        };

        next.ease_factor += CORRECT_EASE_STEP;
    } else {
        next.incorrect_count += 1;
        next.repetitions = 0;
        next.interval = DEFAULT_INTERVAL;
        next.ease_factor += INCORRECT_EASE_STEP;
    }

    // Clamp even when the stored record was already out of range
    next.ease_factor = next.ease_factor.max(MIN_EASE_FACTOR);
    next.interval = next.interval.max(MIN_INTERVAL);

    next.last_reviewed = Some(now);
    next.next_review = Some(due_after(now, next.interval));

    next
}

/// `now` plus whole days, saturating at the latest representable time
fn due_after(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Preview the interval each possible answer would give
/// Returns `[incorrect, correct]`, used to show "next review in ..." hints
pub fn preview_intervals(record: Option<&SchedulingRecord>, now: DateTime<Utc>) -> [u32; 2] {
    let item_id = record.map(|r| r.item_id.as_str()).unwrap_or_default();

    let incorrect = apply_answer(record, item_id, false, now).interval;
    let correct = apply_answer(record, item_id, true, now).interval;

    [incorrect, correct]
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
