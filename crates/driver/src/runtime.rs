//! Async driver loop
//!
//! Player commands, externally scheduled descents and the built-in descent
//! timer all funnel through one task, so no two commands ever race on the
//! same generation.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use anyhow::{anyhow, Context};
use blockfall_types::GameAction;

use crate::config::DriverConfig;
use crate::driver::{Driver, DriverUpdate};
use crate::log::{TransitionLog, TransitionRecord};

/// Bounded depth of the command queue.
pub const COMMAND_QUEUE_DEPTH: usize = 64;

/// Command delivered to the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    Action(GameAction),
    /// Soft drop scheduled by an external timer against `generation`.
    Descend { generation: u64 },
    Shutdown,
}

/// Built-in descent timer
struct DescentTimer {
    interval: Option<Duration>,
    deadline: Option<Instant>,
}

impl DescentTimer {
    fn armed(interval: Option<Duration>) -> Self {
        Self {
            interval,
            deadline: interval.map(|d| Instant::now() + d),
        }
    }

    async fn wait(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }

    /// Re-arm after a firing, or when the interval itself changed.
    fn rearm(&mut self, interval: Option<Duration>, fired: bool) {
        if fired || interval != self.interval {
            *self = Self::armed(interval);
        }
    }
}

/// Run the driver until the command channel closes or `Shutdown` arrives
///
/// Every change is published on `updates` and, when a log is attached,
/// recorded there. Returns the driver with its final state.
pub async fn run_driver(
    mut driver: Driver,
    mut commands: mpsc::Receiver<DriverCommand>,
    updates: watch::Sender<DriverUpdate>,
    log: Option<TransitionLog>,
) -> Driver {
    let mut timer = DescentTimer::armed(driver.descent_interval());

    loop {
        let mut fired = false;
        let transition = tokio::select! {
            cmd = commands.recv() => match cmd {
                None | Some(DriverCommand::Shutdown) => break,
                Some(DriverCommand::Action(action)) => Some(driver.submit(action)),
                Some(DriverCommand::Descend { generation }) => driver.descend(generation),
            },
            _ = timer.wait() => {
                fired = true;
                let generation = driver.generation();
                driver.descend(generation)
            }
        };

        if let Some(transition) = transition {
            if let Some(log) = log.as_ref() {
                log.record(TransitionRecord::new(&transition, driver.state()));
            }
            if transition.changed {
                updates.send_replace(driver.update());
            }
        }
        timer.rearm(driver.descent_interval(), fired);
    }

    if let Some(log) = log {
        if let Err(e) = log.close().await {
            eprintln!("[Driver] {:#}", e);
        }
    }
    println!(
        "[Driver] stopped at generation {} (score {}, lines {})",
        driver.generation(),
        driver.state().score(),
        driver.state().lines()
    );
    driver
}

/// Running driver task
pub struct DriverHandle {
    commands: mpsc::Sender<DriverCommand>,
    updates: watch::Receiver<DriverUpdate>,
    task: JoinHandle<Driver>,
}

impl DriverHandle {
    /// Spawn the driver loop on the current runtime
    pub async fn spawn(driver: Driver, config: &DriverConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let log = match config.log_path.as_deref() {
            Some(path) => {
                println!("[Driver] logging transitions to {}", path);
                Some(TransitionLog::open(path).await?)
            }
            None => None,
        };

        let driver = driver.with_time_scale(config.time_scale);
        let (cmd_tx, cmd_rx) = mpsc::channel::<DriverCommand>(COMMAND_QUEUE_DEPTH);
        let (update_tx, update_rx) = watch::channel(driver.update());
        let task = tokio::spawn(run_driver(driver, cmd_rx, update_tx, log));

        Ok(Self {
            commands: cmd_tx,
            updates: update_rx,
            task,
        })
    }

    pub async fn send(&self, action: GameAction) -> anyhow::Result<()> {
        self.command(DriverCommand::Action(action)).await
    }

    pub async fn descend(&self, generation: u64) -> anyhow::Result<()> {
        self.command(DriverCommand::Descend { generation }).await
    }

    async fn command(&self, cmd: DriverCommand) -> anyhow::Result<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| anyhow!("driver loop has stopped"))
    }

    /// Most recently published update
    pub fn latest(&self) -> DriverUpdate {
        self.updates.borrow().clone()
    }

    pub fn updates(&self) -> watch::Receiver<DriverUpdate> {
        self.updates.clone()
    }

    /// Stop the loop and return the final driver
    pub async fn shutdown(self) -> anyhow::Result<Driver> {
        // A closed queue means the loop is already on its way out.
        let _ = self.commands.send(DriverCommand::Shutdown).await;
        self.task.await.context("driver task panicked")
    }
}
