use anyhow::{bail, Context, Result};

use crate::app::App;

pub fn run(app: &mut App, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("This deletes all review history and progress. Re-run with --yes to confirm.");
    }

    app.coordinator
        .reset()
        .context("Failed to reset study progress")?;

    println!("Progress reset in {}", app.data_dir.display());
    Ok(())
}
