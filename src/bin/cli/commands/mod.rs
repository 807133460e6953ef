pub mod due;
pub mod import;
pub mod quiz;
pub mod reset;
pub mod stats;
pub mod study;

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Print a prompt and read one trimmed line from stdin
/// Returns `None` at end of input
pub fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
