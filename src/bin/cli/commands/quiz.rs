use anyhow::Result;

use wordwise_lib::vocabulary::{check_spelling, QuizScore};

use super::prompt;
use crate::app::App;
use crate::OutputFormat;

pub fn run_multiple_choice(app: &mut App, count: usize, format: &OutputFormat) -> Result<()> {
    let items = app.coordinator.quiz_items(count);
    if items.is_empty() {
        println!("No vocabulary yet. Import some with `import`.");
        return Ok(());
    }

    let option_count = app.config.option_count;
    let mut score = QuizScore::default();

    for (i, item) in items.iter().enumerate() {
        let choice = app.coordinator.multiple_choice(item, option_count);

        println!();
        println!("[{}/{}] {}", i + 1, items.len(), item.source_text);
        for (n, option) in choice.options.iter().enumerate() {
            println!("  {}. {}", n + 1, option);
        }

        let picked = loop {
            let Some(answer) = prompt("  answer: ")? else {
                break None;
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=choice.options.len()).contains(&n) => break Some(n - 1),
                _ => println!("  enter a number from 1 to {}", choice.options.len()),
            }
        };
        let Some(picked) = picked else {
            break;
        };

        let correct = choice.is_correct(picked);
        if correct {
            println!("  correct");
        } else {
            println!("  wrong, it was: {}", choice.correct_answer());
        }

        score.record(correct);
        report_unsaved(app.coordinator.record_answer_now(item, correct).persist_error);
    }

    print_score(&score, format)
}

pub fn run_spelling(app: &mut App, count: usize, format: &OutputFormat) -> Result<()> {
    let items = app.coordinator.quiz_items(count);
    if items.is_empty() {
        println!("No vocabulary yet. Import some with `import`.");
        return Ok(());
    }

    let mut score = QuizScore::default();

    for (i, item) in items.iter().enumerate() {
        println!();
        println!("[{}/{}] {}", i + 1, items.len(), item.target_text);

        let Some(answer) = prompt("  spelling: ")? else {
            break;
        };

        let correct = check_spelling(&item.source_text, &answer);
        if correct {
            println!("  correct");
        } else {
            println!("  wrong, it is spelled: {}", item.source_text);
        }

        score.record(correct);
        report_unsaved(app.coordinator.record_answer_now(item, correct).persist_error);
    }

    print_score(&score, format)
}

fn report_unsaved(error: Option<wordwise_lib::vocabulary::StoreError>) {
    if let Some(e) = error {
        eprintln!("  warning: answer not saved ({})", e);
    }
}

fn print_score(score: &QuizScore, format: &OutputFormat) -> Result<()> {
    let grade = score.grade();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "correct": score.correct,
                    "answered": score.answered,
                    "percentage": score.percentage(),
                    "grade": grade,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!();
            println!(
                "Score: {}/{} ({:.0}%)",
                score.correct,
                score.answered,
                score.percentage()
            );
            println!("{}", grade.message());
        }
    }

    Ok(())
}
