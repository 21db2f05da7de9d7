//! Headless runner (default binary).
//!
//! `replay` applies a fixed action list synchronously; `simulate` drives a
//! seeded random player through the async driver with the real descent
//! timer running.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::runtime::Runtime;

use blockfall::core::{EngineConfig, GameSnapshot, GameState, SimpleRng};
use blockfall::driver::{Driver, DriverConfig, DriverHandle};
use blockfall::types::GameAction;

/// Headless falling-block engine runner.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Headless falling-block puzzle engine runner",
    long_about = "Runs the engine without a display.\n\n\
        Grid size and pacing come from BLOCKFALL_COLS, BLOCKFALL_ROWS, \
        BLOCKFALL_INITIAL_SPEED_MS, BLOCKFALL_MIN_SPEED_MS and BLOCKFALL_SPEED_DECAY. \
        The driver reads BLOCKFALL_LOG_PATH and BLOCKFALL_TIME_SCALE; flags override them."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply actions in order and print the final state.
    Replay {
        /// Piece generator seed.
        #[arg(long, default_value_t = 1)]
        seed: u32,

        /// Comma-separated actions, e.g. moveLeft,rotate,hardDrop.
        #[arg(long, value_delimiter = ',', value_name = "ACTIONS")]
        actions: Vec<String>,

        /// Print the final state as JSON instead of a text grid.
        #[arg(long)]
        json: bool,
    },

    /// Play a seeded random game through the timed driver.
    Simulate {
        /// Seed for both the piece generator and the random player.
        #[arg(long, default_value_t = 1)]
        seed: u32,

        /// Random moves before each hard drop.
        #[arg(long, default_value_t = 4, value_name = "K")]
        actions_per_piece: usize,

        /// Stop after this many locked pieces.
        #[arg(long, default_value_t = 100, value_name = "N")]
        max_pieces: u32,

        /// Descent speed multiplier (overrides BLOCKFALL_TIME_SCALE).
        #[arg(long, value_name = "S")]
        time_scale: Option<f64>,

        /// Transition log file (overrides BLOCKFALL_LOG_PATH).
        #[arg(long, value_name = "FILE")]
        log: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = EngineConfig::from_env();

    match args.command {
        Command::Replay {
            seed,
            actions,
            json,
        } => replay(config, seed, &actions, json),
        Command::Simulate {
            seed,
            actions_per_piece,
            max_pieces,
            time_scale,
            log,
        } => {
            let mut driver_config = DriverConfig::from_env();
            if let Some(time_scale) = time_scale {
                driver_config.time_scale = time_scale;
            }
            if log.is_some() {
                driver_config.log_path = log;
            }

            let rt = Runtime::new().context("failed to create tokio runtime")?;
            rt.block_on(simulate(
                config,
                driver_config,
                seed,
                actions_per_piece,
                max_pieces,
            ))
        }
    }
}

fn parse_actions(names: &[String]) -> Result<Vec<GameAction>> {
    names
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| GameAction::from_str(s).ok_or_else(|| anyhow!("unknown action: {}", s)))
        .collect()
}

fn replay(config: EngineConfig, seed: u32, names: &[String], json: bool) -> Result<()> {
    let actions = parse_actions(names)?;
    let start = GameState::with_config(config, seed)?;
    let state = actions
        .iter()
        .try_fold(start, |state, &action| state.try_apply(action))?;

    let snapshot = state.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&SnapshotJson::from(&snapshot))?);
    } else {
        println!("{}", snapshot);
    }
    Ok(())
}

/// Moves the random player picks from before each hard drop.
const PLAYER_MOVES: [GameAction; 5] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::Rotate,
    GameAction::SoftDrop,
    GameAction::Hold,
];

async fn simulate(
    config: EngineConfig,
    driver_config: DriverConfig,
    seed: u32,
    actions_per_piece: usize,
    max_pieces: u32,
) -> Result<()> {
    let state = GameState::with_config(config, seed)?;
    let handle = DriverHandle::spawn(Driver::new(state), &driver_config).await?;
    let mut updates = handle.updates();
    let mut player = SimpleRng::new(seed.wrapping_mul(0x9E37_79B9));

    loop {
        let current = updates.borrow_and_update().snapshot.clone();
        if current.game_over || current.pieces_locked >= max_pieces {
            break;
        }

        for _ in 0..actions_per_piece {
            let pick = player.next_range(PLAYER_MOVES.len() as u32) as usize;
            handle.send(PLAYER_MOVES[pick]).await?;
        }
        handle.send(GameAction::HardDrop).await?;

        let locked = current.pieces_locked;
        updates
            .wait_for(|u| u.snapshot.game_over || u.snapshot.pieces_locked > locked)
            .await
            .context("driver stopped unexpectedly")?;
    }

    let driver = handle.shutdown().await?;
    let snapshot = driver.state().snapshot();
    if snapshot.pieces_locked == 0 && !snapshot.game_over {
        bail!("simulation made no progress");
    }
    println!("{}", snapshot);
    println!("pieces locked: {}", snapshot.pieces_locked);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ActiveJson {
    kind: &'static str,
    color: &'static str,
    x: i32,
    y: i32,
}

#[derive(Debug, Serialize)]
struct SnapshotJson {
    score: u32,
    lines: u32,
    level: u32,
    game_over: bool,
    paused: bool,
    phase: &'static str,
    next: &'static str,
    held: Option<&'static str>,
    can_hold: bool,
    active: Option<ActiveJson>,
    descent_ms: Option<f64>,
    /// Composite rows: piece letters for filled cells, `.` for empty.
    grid: Vec<String>,
}

impl From<&GameSnapshot> for SnapshotJson {
    fn from(s: &GameSnapshot) -> Self {
        let grid = s
            .composite_rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.map(|k| k.as_str()).unwrap_or("."))
                    .collect::<String>()
            })
            .collect();

        Self {
            score: s.score,
            lines: s.lines,
            level: s.level,
            game_over: s.game_over,
            paused: s.paused,
            phase: s.phase.as_str(),
            next: s.next.as_str(),
            held: s.held.map(|k| k.as_str()),
            can_hold: s.can_hold,
            active: s.active.map(|a| ActiveJson {
                kind: a.kind.as_str(),
                color: a.color,
                x: a.position.x,
                y: a.position.y,
            }),
            descent_ms: s.descent_interval_ms,
            grid,
        }
    }
}
