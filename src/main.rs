use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Fixed-timestep Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tile size in pixels
    #[arg(long)]
    tile: Option<u32>,

    /// Minimum distance between food and the border, in tiles
    #[arg(long)]
    margin: Option<u32>,

    /// Starting speed
    #[arg(long, value_enum)]
    speed: Option<Speed>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    Slow,
    Normal,
    Fast,
    Insane,
}

impl Speed {
    /// Index into the default speed table
    fn index(self) -> usize {
        match self {
            Speed::Slow => 0,
            Speed::Normal => 1,
            Speed::Fast => 2,
            Speed::Insane => 3,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(tile) = cli.tile {
        config.tile_size = tile;
    }
    if let Some(margin) = cli.margin {
        config.food_margin = margin;
    }
    if let Some(speed) = cli.speed {
        config.default_speed = speed.index();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("Invalid settings: {}", msg))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the renderer, so logs only go to a file.
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = build_config(&cli)?;
    let (columns, rows) = crossterm::terminal::size().context("Failed to read terminal size")?;

    let mut human_mode = HumanMode::new(config, columns, rows);
    human_mode.run().await?;

    Ok(())
}
