//! notexam CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "notexam", version, about = "Interactive exam sessions from plain-text notes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive exam session
    Run {
        /// Path to a note file or a directory of .md notes
        #[arg(long)]
        notes: PathBuf,

        /// Shuffle question order at session start
        #[arg(long)]
        shuffle_questions: bool,

        /// Shuffle the options within each question
        #[arg(long)]
        shuffle_options: bool,

        /// Take at most N questions
        #[arg(long)]
        limit: Option<usize>,

        /// Output directory for session reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse notes and report recognized questions and warnings
    Validate {
        /// Path to a note file or a directory of .md notes
        #[arg(long)]
        notes: PathBuf,
    },

    /// Re-render a saved session report
    Review {
        /// Session report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and a sample exam note
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notexam=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            notes,
            shuffle_questions,
            shuffle_options,
            limit,
            output,
            config,
        } => commands::run::execute(notes, shuffle_questions, shuffle_options, limit, output, config),
        Commands::Validate { notes } => commands::validate::execute(notes),
        Commands::Review { report, format } => commands::review::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
