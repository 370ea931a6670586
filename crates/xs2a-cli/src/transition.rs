//! # `xs2a transition` — SCA State Machine Queries
//!
//! Without `--reported`, checks `--from -> --to` against the transition
//! guard. With `--reported`, treats `--to` as the status the bank adapter
//! reported and prints how the engine resolves it.

use clap::Args;
use serde_json::json;
use xs2a_core::ScaStatus;
use xs2a_state::{check_transition, rank, resolve_reported_status};

/// Arguments for `xs2a transition`.
#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Current status, e.g. RECEIVED or PSUIDENTIFIED.
    #[arg(long)]
    pub from: ScaStatus,

    /// Target (or reported) status.
    #[arg(long)]
    pub to: ScaStatus,

    /// Resolve `--to` as an adapter-reported status instead of a write.
    #[arg(long)]
    pub reported: bool,
}

/// Exit code for a rejected transition.
pub const EXIT_REJECTED: u8 = 3;

pub fn run_transition(args: &TransitionArgs) -> anyhow::Result<u8> {
    let (report, allowed) = evaluate(args);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if allowed { 0 } else { EXIT_REJECTED })
}

fn evaluate(args: &TransitionArgs) -> (serde_json::Value, bool) {
    let base = json!({
        "from": args.from.to_string(),
        "to": args.to.to_string(),
        "fromRank": rank(args.from),
        "toRank": rank(args.to),
    });

    let outcome = if args.reported {
        resolve_reported_status(args.from, args.to).map(|decision| {
            json!({
                "resolved": decision.resolved.to_string(),
                "persist": decision.persist,
            })
        })
    } else {
        check_transition(args.from, args.to)
            .map(|outcome| json!({ "outcome": format!("{outcome:?}") }))
    };

    match outcome {
        Ok(detail) => (merge(base, detail), true),
        Err(e) => {
            tracing::debug!(error = %e, "transition rejected");
            (merge(base, json!({ "error": e.to_string() })), false)
        }
    }
}

fn merge(mut base: serde_json::Value, detail: serde_json::Value) -> serde_json::Value {
    if let (Some(target), serde_json::Value::Object(extra)) = (base.as_object_mut(), detail) {
        target.extend(extra);
    }
    base
}
