#![forbid(unsafe_code)]

mod error;
mod play;
mod screen;

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use services::{EngineConfig, QUESTION_COUNT, SessionEngine, TIMER_SECONDS, spawn_session};
use storage::JsonCatalog;

use crate::error::AppError;

/// Timed trivia quiz for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Theme file, or directory of `*.json` theme files.
    #[arg(long, env = "TRIVIA_THEMES", default_value = "themes")]
    themes: PathBuf,

    /// Questions per game.
    #[arg(long, env = "TRIVIA_QUESTIONS", default_value_t = QUESTION_COUNT)]
    questions: usize,

    /// Seconds allowed per question.
    #[arg(long, env = "TRIVIA_TIMER", default_value_t = TIMER_SECONDS)]
    timer: u32,

    /// Fixed seed for question order.
    #[arg(long, env = "TRIVIA_SEED")]
    seed: Option<u64>,
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = EngineConfig::new(args.questions, args.timer)?;

    // Catalog loading stays in the binary so the engine never does I/O.
    let catalog = JsonCatalog::load(&args.themes).await?;
    if catalog.is_empty() {
        return Err(AppError::NoThemes(args.themes.display().to_string()));
    }
    info!(
        "loaded {} themes from {}",
        catalog.len(),
        catalog.root().display()
    );

    let engine = match args.seed {
        Some(seed) => SessionEngine::with_seed(config, seed),
        None => SessionEngine::new(config),
    };
    let (handle, task) = spawn_session(engine);

    play::run(&catalog, handle).await?;

    if let Err(err) = task.await {
        warn!("session task ended abnormally: {err}");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
