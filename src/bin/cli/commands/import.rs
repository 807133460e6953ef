use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use wordwise_lib::VocabularyItem;

use crate::app::App;
use crate::OutputFormat;

/// One entry of an import file; only the two texts are required
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEntry {
    id: Option<String>,
    source_text: String,
    target_text: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    example: String,
    created_at: Option<DateTime<Utc>>,
}

impl ImportEntry {
    fn into_item(self) -> VocabularyItem {
        let mut item = VocabularyItem::new(self.source_text, self.target_text);
        if let Some(id) = self.id {
            item.id = id;
        }
        if let Some(created_at) = self.created_at {
            item.created_at = created_at;
        }
        item.category = self.category;
        item.difficulty = self.difficulty;
        item.example = self.example;
        item
    }
}

pub fn run(app: &App, file: &Path, format: &OutputFormat) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries: Vec<ImportEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid vocabulary file {}", file.display()))?;

    if entries.iter().any(|e| e.source_text.trim().is_empty() || e.target_text.trim().is_empty()) {
        bail!("Every entry needs a non-empty sourceText and targetText");
    }

    let count = entries.len();
    let items = entries.into_iter().map(ImportEntry::into_item).collect();
    let added = app
        .store()
        .import_items(items)
        .context("Failed to save imported items")?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "read": count,
                    "added": added,
                    "updated": count - added,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("Imported {} items ({} new, {} updated)", count, added, count - added);
        }
    }

    Ok(())
}
