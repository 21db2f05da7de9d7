//! Serialized session owner
//!
//! [`Driver`] is the single place where commands meet the session. Every
//! change bumps a generation counter; a descent tagged with an older
//! generation was scheduled against a state that no longer exists and is
//! dropped.

use std::time::Duration;

use blockfall_core::{GameSnapshot, GameState, LockEvent};
use blockfall_types::GameAction;

use crate::config::{MAX_TIME_SCALE, MIN_TIME_SCALE};

/// What triggered a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Action(GameAction),
    /// Automatic soft drop from the descent timer.
    Descent,
}

impl Cause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cause::Action(action) => action.as_str(),
            Cause::Descent => "descent",
        }
    }
}

/// Result of one applied command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub cause: Cause,
    /// Generation after the command.
    pub generation: u64,
    pub changed: bool,
    /// Set when this command locked a piece.
    pub lock: Option<LockEvent>,
}

/// Published after every change
#[derive(Debug, Clone, PartialEq)]
pub struct DriverUpdate {
    pub generation: u64,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone)]
pub struct Driver {
    state: GameState,
    generation: u64,
    time_scale: f64,
}

impl Driver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            generation: 0,
            time_scale: 1.0,
        }
    }

    /// Scale descent intervals
    ///
    /// Values outside `MIN_TIME_SCALE..=MAX_TIME_SCALE` are ignored.
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        if (MIN_TIME_SCALE..=MAX_TIME_SCALE).contains(&time_scale) {
            self.time_scale = time_scale;
        }
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update(&self) -> DriverUpdate {
        DriverUpdate {
            generation: self.generation,
            snapshot: self.state.snapshot(),
        }
    }

    /// Time until the next automatic descent, `None` while suspended
    pub fn descent_interval(&self) -> Option<Duration> {
        self.state
            .descent_interval()
            .and_then(|d| Duration::try_from_secs_f64(d.as_secs_f64() / self.time_scale).ok())
    }

    /// Apply a player command
    pub fn submit(&mut self, action: GameAction) -> Transition {
        self.step(Cause::Action(action), action)
    }

    /// Apply a timer-fired soft drop scheduled at `generation`
    ///
    /// Returns `None` without touching the state when the generation is stale.
    pub fn descend(&mut self, generation: u64) -> Option<Transition> {
        if generation != self.generation {
            return None;
        }
        Some(self.step(Cause::Descent, GameAction::SoftDrop))
    }

    fn step(&mut self, cause: Cause, action: GameAction) -> Transition {
        let next = self.state.apply(action);
        let changed = next != self.state;
        let lock = if next.pieces_locked() > self.state.pieces_locked() {
            next.last_lock()
        } else {
            None
        };

        if changed {
            self.state = next;
            self.generation += 1;
        }

        Transition {
            cause,
            generation: self.generation,
            changed,
            lock,
        }
    }
}
