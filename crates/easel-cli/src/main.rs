use anyhow::Context;
use clap::Parser;
use easel_core::{DrawingSession, MemoryScene, SceneEngine, SessionConfig};
use std::path::PathBuf;

mod script;

#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(version, about = "Replay a drawing script against an in-memory canvas")]
struct Cli {
    /// JSON array of session commands
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Session configuration file (JSON)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the final scene as SVG
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Write the final scene snapshot (JSON)
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let source = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read {}", cli.script.display()))?;
    let commands = script::parse(&source)?;
    log::info!("Replaying {} commands from {}", commands.len(), cli.script.display());

    let scene = MemoryScene::with_background(config.background);
    let mut session = DrawingSession::with_engine(&config, scene)?;
    let summary = script::replay(&mut session, &commands)?;
    println!("{summary}");

    if let Some(path) = &cli.svg {
        if let Some(svg) = session.export_vector()? {
            std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("SVG written to {}", path.display());
        }
    }

    if let Some(path) = &cli.snapshot {
        if let Some(scene) = session.engine() {
            let snapshot = scene.serialize_scene()?;
            std::fs::write(path, snapshot.as_str())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Snapshot written to {}", path.display());
        }
    }

    Ok(())
}
