mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordwise-cli", about = "Vocabulary study with spaced repetition", version)]
struct Cli {
    /// Data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Random seed for reproducible ordering (overrides config.toml)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Import vocabulary items from a JSON file
    Import {
        /// JSON array of items (sourceText, targetText, optional category/difficulty/example/id)
        file: PathBuf,
    },

    /// List items due for review
    Due,

    /// Review due items as flashcards
    Study {
        /// Stop after this many cards
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Study never-reviewed items, oldest first
    Learn {
        /// Number of new items (default from config)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Multiple choice quiz on recently added items
    Quiz {
        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Spelling quiz: type the word for each translation
    Spell {
        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show study statistics
    Stats,

    /// Delete all review history and progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut app = app::App::new(cli.data_dir, cli.seed)?;

    match cli.command {
        Command::Import { file } => {
            commands::import::run(&app, &file, &cli.format)?;
        }
        Command::Due => {
            commands::due::run(&mut app, &cli.format)?;
        }
        Command::Study { limit } => {
            commands::study::run_review(&mut app, limit)?;
        }
        Command::Learn { count } => {
            let count = count.unwrap_or(app.config.new_items_per_session);
            commands::study::run_learn(&mut app, count)?;
        }
        Command::Quiz { count } => {
            let count = count.unwrap_or(app.config.quiz_length);
            commands::quiz::run_multiple_choice(&mut app, count, &cli.format)?;
        }
        Command::Spell { count } => {
            let count = count.unwrap_or(app.config.quiz_length);
            commands::quiz::run_spelling(&mut app, count, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Reset { yes } => {
            commands::reset::run(&mut app, yes)?;
        }
    }

    Ok(())
}
