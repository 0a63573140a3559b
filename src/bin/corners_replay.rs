//! Replays a scripted sequence of pointer events against a fresh game and
//! prints the resulting board.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use corners::assets::PathLoader;
use corners::config::GameConfig;
use corners::replay::Script;
use corners::session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless Corners driver
#[derive(Parser, Debug)]
#[command(name = "corners-replay")]
#[command(about = "Replay scripted input against a Corners game", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML script with one [[frame]] table per loop iteration
    #[arg(short, long)]
    script: PathBuf,

    /// Optional TOML game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_toml_str(&text)?
        }
        None => GameConfig::default(),
    };

    let text = fs::read_to_string(&cli.script)
        .with_context(|| format!("reading script {}", cli.script.display()))?;
    let script = Script::from_toml_str(&text)?;

    let mut session = Session::new(&config, &mut PathLoader)?;
    let report = script.run(&mut session);
    info!(
        frames = report.frames_run,
        draws = report.draw_commands(),
        exited = report.exited,
        "done"
    );

    let game = session.game();
    let (white, black) = game.board().counts();
    print!("{}", game.board());
    println!("to move: {:?} (white {white}, black {black})", game.active_player());
    Ok(())
}
