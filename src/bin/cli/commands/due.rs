use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, format: &OutputFormat) -> Result<()> {
    let due = app.coordinator.due_items(Utc::now());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due. Come back later or run `learn` for new words.");
                return Ok(());
            }

            println!("{} items due:", due.len());
            for item in &due {
                if item.category.is_empty() {
                    println!("  {} - {}", item.source_text, item.target_text);
                } else {
                    println!("  {} - {} [{}]", item.source_text, item.target_text, item.category);
                }
            }
        }
    }

    Ok(())
}
