//! Quiz helpers: multiple choice options, spelling checks and scoring

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::models::VocabularyItem;

/// Default number of options in a multiple choice question
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// A multiple choice question's answer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoice {
    pub options: Vec<String>,
    /// Index of the correct answer in `options`
    pub correct_index: usize,
}

impl MultipleChoice {
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, chosen: usize) -> bool {
        chosen == self.correct_index
    }
}

/// Build shuffled answer options for `correct_item`
///
/// Wrong options are distinct target texts drawn from `all_items`, never equal
/// to the correct text. When there are not enough of them the question simply
/// has fewer options.
pub fn generate_multiple_choice_options<R: Rng + ?Sized>(
    correct_item: &VocabularyItem,
    all_items: &[VocabularyItem],
    option_count: usize,
    rng: &mut R,
) -> MultipleChoice {
    let correct = correct_item.target_text.as_str();

    let mut seen = HashSet::new();
    let candidates: Vec<&str> = all_items
        .iter()
        .map(|item| item.target_text.as_str())
        .filter(|text| *text != correct && seen.insert(*text))
        .collect();

    let wanted = option_count.saturating_sub(1);
    let mut options: Vec<String> = candidates
        .choose_multiple(rng, wanted)
        .map(|text| text.to_string())
        .collect();

    options.push(correct.to_string());
    options.shuffle(rng);

    let correct_index = options
        .iter()
        .position(|option| option == correct)
        .unwrap_or_default();

    MultipleChoice {
        options,
        correct_index,
    }
}

/// Compare a typed answer against the expected spelling
///
/// Ignores case and surrounding whitespace. Everything else must match.
pub fn check_spelling(expected: &str, submitted: &str) -> bool {
    expected.trim().to_lowercase() == submitted.trim().to_lowercase()
}

/// The `count` most recently added items, shuffled
pub fn select_quiz_items<R: Rng + ?Sized>(
    items: &[VocabularyItem],
    count: usize,
    rng: &mut R,
) -> Vec<VocabularyItem> {
    let mut recent = items.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(count);
    recent.shuffle(rng);
    recent
}

/// Overall result band for a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizGrade {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl QuizGrade {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! You know these words well.",
            Self::Good => "Good work, keep it up.",
            Self::Fair => "Getting there, a bit more practice will help.",
            Self::NeedsPractice => "These words need more study.",
        }
    }
}

/// Running score for a quiz
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct: u32,
    pub answered: u32,
}

impl QuizScore {
    pub fn record(&mut self, correct: bool) {
        self.answered += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Percentage of correct answers, 0.0 before any answer
    pub fn percentage(&self) -> f32 {
        if self.answered == 0 {
            0.0
        } else {
            self.correct as f32 * 100.0 / self.answered as f32
        }
    }

    pub fn grade(&self) -> QuizGrade {
        let pct = self.percentage();
        if pct >= 90.0 {
            QuizGrade::Excellent
        } else if pct >= 70.0 {
            QuizGrade::Good
        } else if pct >= 50.0 {
            QuizGrade::Fair
        } else {
            QuizGrade::NeedsPractice
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str, target: &str) -> VocabularyItem {
        let mut item = VocabularyItem::new(id.to_string(), target.to_string());
        item.id = id.to_string();
        item
    }

    fn pool() -> Vec<VocabularyItem> {
        vec![
            item("accomplish", "完成"),
            item("achieve", "实现"),
            item("acquire", "获得"),
            item("adapt", "适应"),
            item("adequate", "足够的"),
            item("finish", "完成"),
        ]
    }

    #[test]
    fn test_correct_answer_appears_once() {
        let items = pool();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = generate_multiple_choice_options(&items[0], &items, 4, &mut rng);

            assert_eq!(choice.options.len(), 4);
            assert_eq!(choice.correct_answer(), "完成");
            assert_eq!(choice.options.iter().filter(|o| *o == "完成").count(), 1);

            let distinct: HashSet<&String> = choice.options.iter().collect();
            assert_eq!(distinct.len(), choice.options.len());
        }
    }

    #[test]
    fn test_duplicate_texts_are_not_wrong_options() {
        // "finish" shares its translation with the correct item
        let items = pool();
        let mut rng = StdRng::seed_from_u64(3);
        let choice = generate_multiple_choice_options(&items[5], &items, 6, &mut rng);

        assert_eq!(choice.options.len(), 5);
        assert!(choice.is_correct(choice.correct_index));
    }

    #[test]
    fn test_too_few_candidates_yields_fewer_options() {
        let items = vec![item("a", "一"), item("b", "二"), item("c", "二")];
        let mut rng = StdRng::seed_from_u64(9);
        let choice = generate_multiple_choice_options(&items[0], &items, 4, &mut rng);

        assert_eq!(choice.options.len(), 2);
        assert_eq!(choice.options[choice.correct_index], "一");
    }

    #[test]
    fn test_single_item_pool() {
        let items = vec![item("a", "一")];
        let mut rng = StdRng::seed_from_u64(9);
        let choice = generate_multiple_choice_options(&items[0], &items, 4, &mut rng);

        assert_eq!(choice.options, vec!["一".to_string()]);
        assert_eq!(choice.correct_index, 0);
    }

    #[test]
    fn test_zero_option_count_keeps_correct_answer() {
        let items = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let choice = generate_multiple_choice_options(&items[1], &items, 0, &mut rng);

        assert_eq!(choice.options, vec!["实现".to_string()]);
    }

    #[test]
    fn test_check_spelling() {
        assert!(check_spelling("Accomplish", "  accomplish "));
        assert!(check_spelling("accomplish", "ACCOMPLISH\n"));
        assert!(!check_spelling("accomplish", "acomplish"));
        assert!(!check_spelling("accomplish", "accomplis"));
        assert!(!check_spelling("ice cream", "icecream"));
    }

    #[test]
    fn test_select_quiz_items_takes_most_recent() {
        let now = Utc::now();
        let mut items = pool();
        for (i, item) in items.iter_mut().enumerate() {
            item.created_at = now - Duration::days(i as i64);
        }
        let mut rng = StdRng::seed_from_u64(5);

        let picked = select_quiz_items(&items, 3, &mut rng);
        let mut ids: Vec<&str> = picked.iter().map(|i| i.id.as_str()).collect();
        ids.sort();

        assert_eq!(ids, vec!["accomplish", "achieve", "acquire"]);
    }

    #[test]
    fn test_quiz_score_grades() {
        let mut score = QuizScore::default();
        assert_eq!(score.percentage(), 0.0);
        assert_eq!(score.grade(), QuizGrade::NeedsPractice);

        for _ in 0..9 {
            score.record(true);
        }
        score.record(false);
        assert_eq!(score.answered, 10);
        assert_eq!(score.grade(), QuizGrade::Excellent);

        let score = QuizScore { correct: 7, answered: 10 };
        assert_eq!(score.grade(), QuizGrade::Good);

        let score = QuizScore { correct: 1, answered: 2 };
        assert_eq!(score.grade(), QuizGrade::Fair);

        let score = QuizScore { correct: 2, answered: 5 };
        assert_eq!(score.grade(), QuizGrade::NeedsPractice);
    }
}
