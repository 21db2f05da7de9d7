//! Advice boundary - asynchronous strategy tips from an outside collaborator
//!
//! The engine never waits on advice. A caller hands [`request_advice`] a
//! read-only [`AdviceRequest`] and gets back a receiver that always yields
//! a string: the collaborator's answer, or a fixed fallback when it fails,
//! panics, answers with nothing, or takes too long.
//!
//! Producing the advice itself (a model call, a heuristic) is up to the
//! [`Advisor`] implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use blockfall_core::{GameSnapshot, GameState};
use blockfall_types::PieceKind;

/// Answer used when the collaborator fails or times out.
pub const FALLBACK_ADVICE: &str = "Aim higher!";

/// Answer used when the collaborator returns nothing.
pub const EMPTY_ADVICE: &str = "Stay focused and fill the gaps!";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only view handed to an advisor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    /// Locked grid, `X` filled and `.` empty, one line per row.
    pub grid_text: String,
    pub current: Option<PieceKind>,
    pub next: PieceKind,
    pub score: u32,
}

impl AdviceRequest {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            grid_text: state.grid().to_text(),
            current: state.active().map(|a| a.tetromino.kind),
            next: state.next_piece().kind,
            score: state.score(),
        }
    }

    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        let grid_text = snapshot
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_some() { 'X' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            grid_text,
            current: snapshot.active.map(|a| a.kind),
            next: snapshot.next,
            score: snapshot.score,
        }
    }

    /// Plain-text prompt for a language-model advisor
    pub fn prompt(&self) -> String {
        format!(
            "Give a short, punchy strategy tip (max 15 words) for this falling-block game.\n\
             Current score: {}\n\
             Current piece: {}\n\
             Next piece type: {}\n\
             Grid (X is filled, . is empty):\n{}\n",
            self.score,
            self.current.map(|k| k.color()).unwrap_or("none"),
            self.next.as_str(),
            self.grid_text
        )
    }
}

/// Outside source of advice
pub trait Advisor: Send + Sync + 'static {
    fn advise(&self, request: AdviceRequest) -> BoxFuture<'_, anyhow::Result<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceConfig {
    pub timeout: Duration,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
        }
    }
}

impl AdviceConfig {
    /// `BLOCKFALL_ADVICE_TIMEOUT_MS` overrides the default 5000 ms
    pub fn from_env() -> Self {
        let timeout = std::env::var("BLOCKFALL_ADVICE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Self::default().timeout);
        Self { timeout }
    }
}

/// Ask `advisor` for a tip without blocking the caller
///
/// Must be called from within a tokio runtime. The receiver resolves exactly
/// once; it only errors if the runtime shuts down first.
pub fn request_advice(
    advisor: Arc<dyn Advisor>,
    request: AdviceRequest,
    timeout: Duration,
) -> oneshot::Receiver<String> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let mut call = tokio::spawn(async move { advisor.advise(request).await });

        let text = match tokio::time::timeout(timeout, &mut call).await {
            Ok(Ok(Ok(text))) if !text.trim().is_empty() => text,
            Ok(Ok(Ok(_))) => EMPTY_ADVICE.to_string(),
            Ok(Ok(Err(e))) => {
                eprintln!("[Advice] advisor failed: {:#}", e);
                FALLBACK_ADVICE.to_string()
            }
            Ok(Err(e)) => {
                eprintln!("[Advice] advisor task failed: {}", e);
                FALLBACK_ADVICE.to_string()
            }
            Err(_) => {
                call.abort();
                eprintln!("[Advice] advisor timed out after {:?}", timeout);
                FALLBACK_ADVICE.to_string()
            }
        };

        // Nobody listening is fine; advice is best effort.
        let _ = tx.send(text);
    });

    rx
}
