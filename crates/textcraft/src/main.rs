use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use textcraft_core::{analyze, InMemorySurface, SurfaceKind, TextStats, TransformKind};
use textcraft_history::{config, HistoryConfig, SnapshotVault};
use textcraft_session::SurfaceSession;

/// Undo/redo history, transforms, and risk analysis for text surfaces.
#[derive(Parser, Debug)]
#[command(name = "textcraft", version, about)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print word/char/line statistics for a file (or stdin with "-").
    Stats {
        /// Input file, or "-" for stdin.
        input: PathBuf,
    },
    /// Apply a case transform and print the result.
    Transform {
        /// One of: uppercase, lowercase, titlecase.
        #[arg(long)]
        kind: String,
        /// Input file, or "-" for stdin.
        input: PathBuf,
    },
    /// Run the heuristic risk analysis and print the report as JSON.
    Analyze {
        /// Input file, or "-" for stdin.
        input: PathBuf,
    },
    /// Interactive session: one JSON command per stdin line, one JSON
    /// response per stdout line. Non-JSON lines are treated as typed
    /// text and recorded into the history.
    Session {
        /// Stable surface identifier for history recovery.
        #[arg(long, default_value = "cli")]
        surface: String,
        /// Keep history in memory only (no vault).
        #[arg(long)]
        no_persist: bool,
    },
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))
    }
}

fn run_session(surface: &str, no_persist: bool) -> Result<()> {
    let config = HistoryConfig::default();
    let vault = if no_persist {
        None
    } else {
        Some(SnapshotVault::open(&config.data_dir).context("Failed to open snapshot vault")?)
    };

    let surface_id = config::surface_id_for_address(surface);
    let mut session = SurfaceSession::resume(surface_id, config, vault)
        .context("Failed to resume session history")?;
    session.attach(SurfaceKind::TextArea, Box::new(InMemorySurface::new()));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command line")?;
        if line.trim().is_empty() {
            continue;
        }
        if line.trim_start().starts_with('{') {
            let response = session.handle_json(&line);
            let json =
                serde_json::to_string(&response).context("Failed to serialize response")?;
            writeln!(stdout, "{json}").context("Failed to write response")?;
        } else {
            // Observer path: the line is the surface's new content.
            session.surface_input(&line);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        CliCommand::Stats { input } => {
            let text = read_input(&input)?;
            let stats = TextStats::of(&text);
            let json = serde_json::to_string(&stats).context("Failed to serialize stats")?;
            println!("{json}");
        }
        CliCommand::Transform { kind, input } => {
            let kind: TransformKind = kind.parse()?;
            let text = read_input(&input)?;
            print!("{}", kind.apply(&text));
        }
        CliCommand::Analyze { input } => {
            let text = read_input(&input)?;
            let report = analyze(&text);
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
        CliCommand::Session { surface, no_persist } => {
            tracing::info!("Starting textcraft session");
            run_session(&surface, no_persist)?;
        }
    }

    Ok(())
}
