use anyhow::Result;
use chrono::Utc;

use wordwise_lib::vocabulary::algorithm::{format_interval, preview_intervals};
use wordwise_lib::vocabulary::ReviewSession;

use super::prompt;
use crate::app::App;

/// Review everything due now
pub fn run_review(app: &mut App, limit: Option<usize>) -> Result<()> {
    let mut due = app.coordinator.due_items(Utc::now());
    if let Some(limit) = limit {
        due.truncate(limit);
    }

    if due.is_empty() {
        println!("Nothing due for review.");
        return Ok(());
    }

    run_session(app, ReviewSession::new(due))
}

/// Go through never-reviewed items
pub fn run_learn(app: &mut App, count: usize) -> Result<()> {
    let fresh = app.coordinator.new_items(count);
    if fresh.is_empty() {
        println!("No new items left. Import more with `import`.");
        return Ok(());
    }

    run_session(app, ReviewSession::new(fresh))
}

fn run_session(app: &mut App, mut session: ReviewSession) -> Result<()> {
    let total = session.len();
    let mut known = 0;

    while let Some(item) = session.current().cloned() {
        println!();
        println!("[{}/{}] {}", session.position() + 1, total, item.source_text);

        if prompt("  (enter to reveal) ")?.is_none() {
            break;
        }
        println!("  {}", item.target_text);
        if !item.example.is_empty() {
            println!("  e.g. {}", item.example);
        }

        let record = app.coordinator.record_for(&item.id);
        let [again, good] = preview_intervals(record.as_ref(), Utc::now());
        println!(
            "  y: {}  n: {}",
            format_interval(good),
            format_interval(again)
        );

        let correct = loop {
            match prompt("  Did you know it? [y/n/q] ")?.as_deref() {
                Some("y") | Some("Y") => break Some(true),
                Some("n") | Some("N") => break Some(false),
                Some("q") | Some("Q") | None => break None,
                Some(_) => continue,
            }
        };
        let Some(correct) = correct else {
            break;
        };

        let outcome = app.coordinator.record_answer_now(&item, correct);
        if correct {
            known += 1;
        }
        println!("  next review in {}", format_interval(outcome.record.interval));
        if let Some(e) = &outcome.persist_error {
            eprintln!("  warning: answer not saved ({})", e);
        }

        session.advance();
    }

    let answered = session.position();
    println!();
    println!("Reviewed {} of {} ({} known)", answered, total, known);

    let progress = app.coordinator.progress();
    println!("Streak: {} day(s)", progress.streak_days);

    Ok(())
}
