//! # xs2a-state — SCA Authorisation State Machine
//!
//! Implements the lifecycle of an SCA authorisation and the rules that keep
//! it monotonic.
//!
//! ## State Machine
//!
//! ```text
//! RECEIVED ──▶ PSUIDENTIFIED ──▶ PSUAUTHENTICATED ──▶ SCAMETHODSELECTED ──▶ STARTED ──▶ FINALISED
//!    any non-terminal state ──▶ FAILED   (explicit failure edge)
//!    any non-terminal state ──▶ EXEMPTED (SCA waived)
//! ```
//!
//! - **Transition guard** (`transition.rs`): rank table and the
//!   `check_transition` guard. Forward moves and the terminal edges are
//!   allowed; regressions and moves out of a terminal state are rejected.
//!
//! - **Lifecycle** (`lifecycle.rs`): wraps an `Authorisation` snapshot and
//!   applies guarded transitions, appending each to a transition log.
//!
//! - **Resolution** (`resolution.rs`): the pure decision of what to report
//!   and whether to persist when the bank adapter reports a status that
//!   differs from the known one.
//!
//! ## Design
//!
//! The CMS owns authorisation records, so states stay a runtime enum
//! (`ScaStatus`) rather than one type per state. Every write the engine
//! requests goes through `check_transition` first.

pub mod lifecycle;
pub mod resolution;
pub mod transition;

// ─── Transition re-exports ──────────────────────────────────────────

pub use transition::{check_transition, rank, ScaTransitionError, TransitionOutcome};

// ─── Lifecycle re-exports ───────────────────────────────────────────

pub use lifecycle::{AuthorisationLifecycle, ScaTransitionRecord};

// ─── Resolution re-exports ──────────────────────────────────────────

pub use resolution::{resolve_reported_status, StatusDecision};
