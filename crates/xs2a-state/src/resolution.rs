//! # Status Resolution
//!
//! Decides, for a status freshly reported by the bank adapter, what the
//! engine reports and whether it asks the CMS to persist it.
//!
//! During an active authorisation the adapter is the source of truth for
//! the current status, so the reported status is always what the caller
//! sees. Only a move to FINALISED is persisted, and only when the guard
//! allows it.

use serde::{Deserialize, Serialize};

use xs2a_core::ScaStatus;

use crate::transition::{check_transition, ScaTransitionError};

/// What to report and whether to write it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDecision {
    /// Status returned to the caller.
    pub resolved: ScaStatus,
    /// Whether `update_authorisation_status(id, resolved)` must be issued.
    pub persist: bool,
}

/// Merge the known status with the status reported by the adapter.
///
/// Fails only when the adapter reports FINALISED for an authorisation the
/// guard no longer allows to move (a terminal one).
pub fn resolve_reported_status(
    known: ScaStatus,
    reported: ScaStatus,
) -> Result<StatusDecision, ScaTransitionError> {
    if reported == known || !reported.is_finalised() {
        return Ok(StatusDecision {
            resolved: reported,
            persist: false,
        });
    }
    check_transition(known, reported)?;
    Ok(StatusDecision {
        resolved: reported,
        persist: true,
    })
}
