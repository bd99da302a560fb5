//! squib - compact explosive hazard demo
//!
//! Stages a row of squib charges in a headless in-memory world, powers the
//! first one, and runs the chain reaction to completion.

mod config;
mod game;

use anyhow::{bail, ensure, Result};
use config::SimConfig;
use game::GameWorld;
use std::{env, path::PathBuf};
use tracing::info;

/// Command-line options.
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    max_ticks: Option<u64>,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => match args.next() {
                    Some(path) => options.config = Some(PathBuf::from(path)),
                    None => bail!("--config requires a path"),
                },
                "--max-ticks" => match args.next() {
                    Some(value) => options.max_ticks = Some(value.parse()?),
                    None => bail!("--max-ticks requires a number"),
                },
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting squib v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut cfg = match cli.config.as_deref() {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(max_ticks) = cli.max_ticks {
        cfg.max_ticks = max_ticks;
    }
    cfg.validate()?;

    run_demo(&cfg)
}

fn run_demo(cfg: &SimConfig) -> Result<()> {
    let mut world = GameWorld::new(cfg);
    world.stage_chain_scenario(cfg);

    let steps = world.run_until_quiet(cfg.max_ticks);

    info!(
        steps,
        detonations = world.detonation_count(),
        charges_left = world.charges_remaining(),
        "run complete"
    );
    ensure!(
        world.live_squibs() == 0,
        "run hit the {}-tick cap with {} fuse(s) still burning",
        cfg.max_ticks,
        world.live_squibs()
    );
    Ok(())
}
