//! Review CLI - grades every move of a recorded game.
//!
//! Reads a PGN-style game record, replays its coordinate-notation moves
//! against a UCI engine and prints a per-move score and quality label.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config::ReviewFileConfig;
use engine_session::EngineSession;
use game_review::{GameReviewer, MoveEvaluation, ReviewConfig};

/// Grades each move of a game record using a UCI engine.
#[derive(Parser)]
#[command(name = "review-cli")]
#[command(about = "Replays a game record against a UCI engine and grades each move")]
struct Cli {
    /// Path to the game record (PGN movetext with coordinate-notation moves)
    pgn: PathBuf,
    /// Engine command, overriding the config file
    #[arg(short, long)]
    engine: Option<String>,
    /// Search depth per move, overriding the config file
    #[arg(short, long)]
    depth: Option<u32>,
    /// Read timeout in milliseconds, overriding the config file
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Evaluate each move on the full game prefix instead of in isolation
    #[arg(long)]
    cumulative: bool,
    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let file = ReviewFileConfig::load().context("loading review.toml")?;

    let engine = cli.engine.unwrap_or(file.engine);
    let depth = cli.depth.unwrap_or(file.depth);
    let timeout_ms = cli.timeout_ms.or(file.read_timeout_ms);

    let record = std::fs::read_to_string(&cli.pgn)
        .with_context(|| format!("reading game record {}", cli.pgn.display()))?;

    tracing::info!(engine = engine.as_str(), depth, "starting review");

    let mut session = EngineSession::spawn(&engine, file.dialect)?;
    if let Some(ms) = timeout_ms {
        session.set_read_timeout(Some(Duration::from_millis(ms)));
    }
    session.initialize().context("engine handshake")?;

    let review_config = ReviewConfig {
        depth,
        cumulative: cli.cumulative || file.cumulative,
        ..ReviewConfig::default()
    };
    let mut reviewer = GameReviewer::new(session, review_config);
    let evaluations = reviewer.review(&record)?;
    reviewer.shutdown();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&evaluations)?);
    } else {
        render_table(&evaluations);
    }
    Ok(())
}

fn render_table(evaluations: &[MoveEvaluation]) {
    if evaluations.is_empty() {
        println!("No coordinate-notation moves found in the record.");
        return;
    }
    for (index, eval) in evaluations.iter().enumerate() {
        let score = eval
            .score
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        println!(
            "{:>3}. {:<8} score {:>6}  {}",
            index + 1,
            eval.played,
            score,
            eval.quality
        );
    }
}
