// ============================================================
// Layer 3 — Run State Machine
// ============================================================
// Lifecycle of one training run:
//
//   Idle → Loaded → Vectorized → Split → Fitting → Done
//                                           │
//                                           └──→ Failed
//
// There is no recovery from Failed: the only way forward is
// to restart from Loaded with the records already in memory.
// Any other transition is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Loaded,
    Vectorized,
    Split,
    Fitting,
    Done,
    Failed,
}

impl RunState {
    /// Whether `self → next` is a legal step
    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, Loaded)
                | (Loaded, Vectorized)
                | (Vectorized, Split)
                | (Split, Fitting)
                | (Fitting, Done)
                | (Fitting, Failed)
                | (Failed, Loaded)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Illegal run transition {from} → {to}")]
pub struct TransitionError {
    pub from: RunState,
    pub to:   RunState,
}

/// Tracks the current state of a run and logs each transition.
#[derive(Debug)]
pub struct RunTracker {
    state:   RunState,
    history: Vec<RunState>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self { state: RunState::Idle, history: vec![RunState::Idle] }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Every state visited so far, oldest first
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    pub fn advance(&mut self, next: RunState) -> Result<(), TransitionError> {
        if !self.state.can_advance_to(next) {
            return Err(TransitionError { from: self.state, to: next });
        }
        tracing::debug!("Run state: {} → {}", self.state, next);
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Mark the run as failed. Only legal while fitting.
    pub fn fail(&mut self) -> Result<(), TransitionError> {
        self.advance(RunState::Failed)
    }

    /// Restart a failed run from Loaded.
    pub fn restart(&mut self) -> Result<(), TransitionError> {
        if self.state != RunState::Failed {
            return Err(TransitionError { from: self.state, to: RunState::Loaded });
        }
        self.advance(RunState::Loaded)
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}
