use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let overview = app.coordinator.overview(Utc::now());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        OutputFormat::Plain => {
            let progress = &overview.progress;

            println!("Streak:      {} day(s) (best {})", progress.streak_days, progress.best_streak_days);
            if let Some(last) = progress.last_study_date {
                println!("Last study:  {}", last);
            }
            println!();
            println!(
                "Studied:     {} of {} items ({:.0}%)",
                overview.studied_items,
                overview.total_items,
                overview.studied_ratio * 100.0
            );
            println!("Due now:     {}", overview.due_items);
            println!(
                "New: {}  Learning: {}  Review: {}  Relearning: {}",
                overview.new_items,
                overview.learning_items,
                overview.review_items,
                overview.relearning_items
            );
            println!();
            println!(
                "Answers:     {} ({} correct, {} incorrect)",
                progress.total_words_studied, progress.total_correct, progress.total_incorrect
            );
            println!("Accuracy:    {:.1}%", progress.accuracy * 100.0);

            if !overview.by_category.is_empty() {
                println!();
                println!("Studied by category:");
                for (category, count) in &overview.by_category {
                    let name = if category.is_empty() { "(none)" } else { category.as_str() };
                    println!("  {}: {}", name, count);
                }
            }
        }
    }

    Ok(())
}
