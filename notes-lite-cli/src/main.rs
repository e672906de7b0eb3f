//! notes-lite command-line entry point
//!
//! Opens one session (local or remote backend, picked from the
//! configuration file), runs a single command against it and exits.
//!
//! # Usage
//!
//! ```bash
//! notes-lite status
//! notes-lite new "Groceries #todo"
//! notes-lite list --query todo
//! notes-lite mkdir Work
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notes_lite_app::StartupOptions;

/// A small notes store with local and remote backends
#[derive(Parser, Debug)]
#[command(name = "notes-lite", version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "NOTES_LITE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Local database file, overrides the configured one
    #[arg(long, global = true, env = "NOTES_LITE_DATABASE", value_name = "PATH")]
    database: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the active backend and counts
    Status,
    /// Print the folder tree with note counts
    Folders,
    /// List notes of a folder
    List {
        /// Folder id, defaults to the root folder
        #[arg(long)]
        folder: Option<String>,
        /// Only notes whose text or tags contain this
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Print one note
    Show { id: String },
    /// Create a note
    New {
        /// Initial text; each line becomes a paragraph
        text: Option<String>,
        /// Folder id, defaults to the root folder
        #[arg(long)]
        folder: Option<String>,
    },
    /// Replace a note's content (read from stdin when TEXT is omitted)
    Edit {
        id: String,
        text: Option<String>,
        /// Treat the content as rich text instead of plain lines
        #[arg(long)]
        html: bool,
    },
    /// Delete a note
    Rm { id: String },
    /// Move a note to another folder
    Mv { id: String, folder: String },
    /// Move a note or folder one place up
    Up {
        id: String,
        /// The id names a folder
        #[arg(long)]
        folder: bool,
    },
    /// Move a note or folder one place down
    Down {
        id: String,
        /// The id names a folder
        #[arg(long)]
        folder: bool,
    },
    /// Create a folder
    Mkdir {
        name: String,
        /// Parent folder id, defaults to top level
        #[arg(long)]
        parent: Option<String>,
    },
    /// Delete an empty folder
    Rmdir { id: String },
    /// List every tag in use
    Tags,
    /// List notes linking to a note with `[[title]]`
    Backlinks { id: String },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn startup_options(cli: &Cli) -> Result<StartupOptions> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => dirs::config_dir()
            .context("No configuration directory on this platform")?
            .join("notes-lite")
            .join("config.json"),
    };
    let default_database_path = dirs::data_dir()
        .context("No data directory on this platform")?
        .join("notes-lite")
        .join("notes.db");

    Ok(StartupOptions {
        config_path,
        database_path: cli.database.clone(),
        default_database_path,
    })
}

async fn run(cli: Cli) -> Result<()> {
    let options = startup_options(&cli)?;
    let state = notes_lite_app::bootstrap(&options)
        .await
        .context("Failed to open the notes store")?;
    commands::run(&state, cli.command, cli.yes).await
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    tracing::debug!("Running {:?}", cli.command);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
