//! JSON-lines transition log
//!
//! One record per applied command, written by a dedicated task so the
//! driver loop never waits on the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use blockfall_core::GameState;

use crate::driver::Transition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub generation: u64,
    pub command: String,
    pub changed: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lines_cleared: Option<u32>,
    pub descent_ms: Option<f64>,
}

impl TransitionRecord {
    pub fn new(transition: &Transition, state: &GameState) -> Self {
        Self {
            generation: transition.generation,
            command: transition.cause.as_str().to_string(),
            changed: transition.changed,
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
            game_over: state.is_game_over(),
            paused: state.is_paused(),
            lines_cleared: transition.lock.map(|e| e.lines_cleared),
            descent_ms: state.descent_interval_ms(),
        }
    }
}

/// Handle to the writer task
#[derive(Debug)]
pub struct TransitionLog {
    tx: mpsc::UnboundedSender<TransitionRecord>,
    task: JoinHandle<()>,
}

impl TransitionLog {
    /// Open `path` for appending and start the writer task
    pub async fn open(path: &str) -> anyhow::Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open transition log {}", path))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<TransitionRecord>();
        let task = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(256);
            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    eprintln!("[Driver] transition log write failed; logging stopped");
                    break;
                }
            }
            let _ = file.flush().await;
        });

        Ok(Self { tx, task })
    }

    pub fn record(&self, record: TransitionRecord) {
        let _ = self.tx.send(record);
    }

    /// Flush pending records and stop the writer
    pub async fn close(self) -> anyhow::Result<()> {
        drop(self.tx);
        self.task.await.context("transition log writer panicked")
    }
}
