//! # Authorisation Lifecycle
//!
//! Wraps an `Authorisation` snapshot and applies guarded status
//! transitions, keeping an ordered log of every change. Used by the service
//! layer to compute the status it asks the CMS to persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use xs2a_core::{Authorisation, ScaStatus};

use crate::transition::{check_transition, ScaTransitionError, TransitionOutcome};

// ─── Transition Log ──────────────────────────────────────────────────

/// Record of an SCA status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaTransitionRecord {
    /// Status before the transition.
    pub from_state: ScaStatus,
    /// Status after the transition.
    pub to_state: ScaStatus,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
    /// Why the transition happened.
    pub reason: String,
}

// ─── Lifecycle ───────────────────────────────────────────────────────

/// An authorisation with its transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorisationLifecycle {
    authorisation: Authorisation,
    transitions: Vec<ScaTransitionRecord>,
}

impl AuthorisationLifecycle {
    /// Start tracking an authorisation at its current status.
    pub fn new(authorisation: Authorisation) -> Self {
        Self {
            authorisation,
            transitions: Vec::new(),
        }
    }

    /// Current status.
    pub fn status(&self) -> ScaStatus {
        self.authorisation.sca_status
    }

    pub fn authorisation(&self) -> &Authorisation {
        &self.authorisation
    }

    pub fn into_authorisation(self) -> Authorisation {
        self.authorisation
    }

    /// Ordered log of applied transitions.
    pub fn transitions(&self) -> &[ScaTransitionRecord] {
        &self.transitions
    }

    /// Move to `to` if the guard allows it.
    ///
    /// A no-op transition leaves the log untouched.
    pub fn transition_to(
        &mut self,
        to: ScaStatus,
        reason: &str,
    ) -> Result<TransitionOutcome, ScaTransitionError> {
        let outcome = check_transition(self.status(), to)?;
        if outcome == TransitionOutcome::Advanced {
            self.transitions.push(ScaTransitionRecord {
                from_state: self.status(),
                to_state: to,
                timestamp: Utc::now(),
                reason: reason.to_string(),
            });
            self.authorisation.sca_status = to;
        }
        Ok(outcome)
    }

    /// Explicit failure edge (any non-terminal status → FAILED).
    pub fn fail(&mut self, reason: &str) -> Result<TransitionOutcome, ScaTransitionError> {
        self.transition_to(ScaStatus::Failed, reason)
    }

    /// Successful completion (→ FINALISED).
    pub fn finalise(&mut self, reason: &str) -> Result<TransitionOutcome, ScaTransitionError> {
        self.transition_to(ScaStatus::Finalised, reason)
    }

    /// Whether the authorisation reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
