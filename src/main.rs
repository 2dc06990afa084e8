//! latchkey - a first-person door and key interaction sandbox
//!
//! Headless executable: loads a scene, optionally replays an input script,
//! and reports everything that happens through `tracing`.

mod config;
mod game;
mod input;
mod player;
mod scripted_input;

use anyhow::Result;
use config::ControlsConfig;
use game::Game;
use latchkey_audio::{AudioSink, LogSink};
use scripted_input::ScriptedInputPlayer;
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_SCENE_PATH: &str = "config/scene.json";

fn main() -> Result<()> {
    // --quiet must be known before the subscriber exists, so peek at the
    // raw arguments; the full parse happens below with logging available.
    let quiet = env::args().any(|arg| arg == "--quiet");
    let default_filter = if quiet { "warn" } else { "info" };

    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    info!("Starting latchkey v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));

    let controls = match &cli.controls {
        Some(path) => ControlsConfig::load_from_path(path),
        None => ControlsConfig::load(),
    };
    let scene_path = cli
        .scene
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE_PATH));
    let scene = config::load_scene(&scene_path)?;

    let audio: Box<dyn AudioSink> = Box::new(LogSink);
    let mut game = Game::new(&scene, &controls, audio, cli.seed)?;

    match &cli.script {
        Some(path) => {
            let mut script = ScriptedInputPlayer::from_path(path)?;
            game.run_scripted(&mut script, cli.max_ticks);
        }
        None => {
            // Without a script there is no input source; just let the world
            // settle for the requested number of ticks.
            let ticks = cli.max_ticks.unwrap_or(20);
            game.run_idle(ticks);
        }
    }

    info!(
        ticks = game.tick().0,
        keys = game.inventory().held_count(),
        objects = game.world().object_count(),
        "latchkey shutting down"
    );
    Ok(())
}

#[derive(Clone)]
struct CliOptions {
    scene: Option<PathBuf>,
    controls: Option<PathBuf>,
    script: Option<PathBuf>,
    max_ticks: Option<u64>,
    seed: u64,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            scene: None,
            controls: None,
            script: None,
            max_ticks: None,
            seed: 0,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scene" => {
                    if let Some(path) = args.next() {
                        opts.scene = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scene requires a file path");
                    }
                }
                "--controls" => {
                    if let Some(path) = args.next() {
                        opts.controls = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--controls requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                // Consumed before logging was initialized.
                "--quiet" => {}
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = value,
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                _ => {}
            }
        }

        opts
    }
}
