//! # SCA Transition Guard
//!
//! Rank table over `ScaStatus` and the guard every status write must pass.
//!
//! ## Rules
//!
//! - A terminal status (FINALISED, FAILED, EXEMPTED) absorbs: re-applying
//!   the same terminal status is an idempotent no-op, anything else is
//!   rejected.
//! - FAILED and EXEMPTED are reachable from every non-terminal status.
//! - Otherwise a transition must strictly increase the rank. Applying the
//!   current status again is a no-op.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use xs2a_core::ScaStatus;

// ─── Errors ──────────────────────────────────────────────────────────

/// A requested SCA status change violates the state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaTransitionError {
    /// The authorisation already reached a terminal status.
    #[error("authorisation is in terminal status {state}, cannot move to {to}")]
    TerminalState {
        /// The terminal status.
        state: ScaStatus,
        /// Attempted target status.
        to: ScaStatus,
    },

    /// The target status lies behind the current one.
    #[error("SCA status regression: {from} -> {to}")]
    Regression {
        /// Current status.
        from: ScaStatus,
        /// Attempted target status.
        to: ScaStatus,
    },
}

// ─── Guard ───────────────────────────────────────────────────────────

/// Result of a successful guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionOutcome {
    /// The status changes.
    Advanced,
    /// Target equals current; nothing to write.
    Unchanged,
}

/// Position of a status along the happy path. Terminal statuses share the
/// highest rank.
pub fn rank(status: ScaStatus) -> u8 {
    match status {
        ScaStatus::Received => 0,
        ScaStatus::PsuIdentified => 1,
        ScaStatus::PsuAuthenticated => 2,
        ScaStatus::ScaMethodSelected => 3,
        ScaStatus::Started => 4,
        ScaStatus::Finalised | ScaStatus::Failed | ScaStatus::Exempted => 5,
    }
}

/// Check whether `from -> to` is allowed.
pub fn check_transition(
    from: ScaStatus,
    to: ScaStatus,
) -> Result<TransitionOutcome, ScaTransitionError> {
    if from == to {
        return Ok(TransitionOutcome::Unchanged);
    }
    if from.is_terminal() {
        return Err(ScaTransitionError::TerminalState { state: from, to });
    }
    if to.is_terminal() || rank(to) > rank(from) {
        return Ok(TransitionOutcome::Advanced);
    }
    Err(ScaTransitionError::Regression { from, to })
}
