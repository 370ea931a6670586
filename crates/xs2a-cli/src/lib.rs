//! # xs2a-cli — Operator Tooling for the SCA Engine
//!
//! Provides the `xs2a` command-line interface. Each subcommand lives in its
//! own module with an `Args` struct and a `run_*` handler returning the
//! process exit code.
//!
//! ## Subcommands
//!
//! - `xs2a profile` — Load an ASPSP profile file, report consistency
//!   problems, print the effective settings as JSON.
//! - `xs2a transition` — Ask the SCA state machine whether a status change
//!   is allowed, or how an adapter-reported status is resolved.
//! - `xs2a access` — Evaluate the endpoint accessibility decision for an
//!   authorisation under a given profile.
//!
//! ```bash
//! xs2a profile --profile deploy/aspsp-profile.yaml
//! xs2a transition --from RECEIVED --to FINALISED
//! xs2a access --approach REDIRECT --confirmation-code --profile deploy/aspsp-profile.yaml
//! ```

pub mod access;
pub mod profile;
pub mod transition;

use std::path::Path;

use anyhow::Context;
use xs2a_service::AspspProfile;

/// Load the profile at `path`, or the default profile when none is given.
pub fn load_profile(path: Option<&Path>) -> anyhow::Result<AspspProfile> {
    match path {
        Some(path) => AspspProfile::load(path)
            .with_context(|| format!("loading ASPSP profile {}", path.display())),
        None => {
            tracing::info!("no profile given, using defaults");
            Ok(AspspProfile::default())
        }
    }
}
