//! Driver - owns a session and schedules its automatic descent
//!
//! The engine has no clock; this crate supplies one. All inputs (player
//! commands, the built-in descent timer, descents scheduled elsewhere) are
//! applied by a single tokio task, one at a time, in arrival order.
//!
//! # Generations
//!
//! Every state change bumps the driver's generation and publishes a
//! [`DriverUpdate`]. A descent tagged with an older generation is dropped,
//! so a timer armed against a superseded state cannot lock a piece twice.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_LOG_PATH`: append one JSON line per applied command
//! - `BLOCKFALL_TIME_SCALE`: descent speed multiplier (default: 1.0)
//!
//! # Example
//!
//! ```no_run
//! use blockfall_core::GameState;
//! use blockfall_driver::{Driver, DriverConfig, DriverHandle};
//! use blockfall_types::GameAction;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let handle = DriverHandle::spawn(Driver::new(GameState::new(7)), &DriverConfig::from_env()).await?;
//! handle.send(GameAction::HardDrop).await?;
//! let driver = handle.shutdown().await?;
//! println!("{}", driver.state().snapshot());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod log;
pub mod runtime;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::{DriverConfig, MAX_TIME_SCALE, MIN_TIME_SCALE};
pub use driver::{Cause, Driver, DriverUpdate, Transition};
pub use log::{TransitionLog, TransitionRecord};
pub use runtime::{run_driver, DriverCommand, DriverHandle, COMMAND_QUEUE_DEPTH};
