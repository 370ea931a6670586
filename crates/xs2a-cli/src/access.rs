//! # `xs2a access` — Endpoint Accessibility Decision
//!
//! Runs [`EndpointAccessibilityChecker`] against a single in-memory
//! authorisation so operators can see how a profile treats each SCA
//! approach before deploying it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde_json::json;
use xs2a_core::{Authorisation, AuthorisationId, AuthorisationType, ScaApproach};
use xs2a_service::{AuthorisationCms, CmsError, EndpointAccessibilityChecker};

/// Arguments for `xs2a access`.
#[derive(Args, Debug)]
pub struct AccessArgs {
    /// SCA approach chosen for the authorisation.
    #[arg(long, default_value = "REDIRECT")]
    pub approach: ScaApproach,

    /// The TPP sent an authorisation confirmation code.
    #[arg(long)]
    pub confirmation_code: bool,

    /// Simulate an unreachable CMS when the authorisation is looked up.
    #[arg(long)]
    pub cms_unavailable: bool,

    /// ASPSP profile YAML file. Defaults apply when omitted.
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

/// Exit code when the endpoint is not accessible.
pub const EXIT_BLOCKED: u8 = 4;

/// Holds one authorisation, or fails every lookup.
struct SingleAuthorisation {
    authorisation: Option<Authorisation>,
}

impl AuthorisationCms for SingleAuthorisation {
    fn get_authorisation_by_id(
        &self,
        authorisation_id: &AuthorisationId,
    ) -> Result<Authorisation, CmsError> {
        match &self.authorisation {
            Some(a) if &a.authorisation_id == authorisation_id => Ok(a.clone()),
            Some(_) => Err(CmsError::NotFound {
                resource: "authorisation",
                id: authorisation_id.to_string(),
            }),
            None => Err(CmsError::Technical {
                reason: "CMS unavailable".to_string(),
            }),
        }
    }

    fn update_authorisation_status(
        &self,
        authorisation_id: &AuthorisationId,
        _status: xs2a_core::ScaStatus,
    ) -> Result<(), CmsError> {
        Err(CmsError::Technical {
            reason: format!("read-only store, cannot update {authorisation_id}"),
        })
    }
}

pub fn run_access(args: &AccessArgs) -> anyhow::Result<u8> {
    let profile = crate::load_profile(args.profile.as_deref())?;
    let flow = profile.sca_redirect_flow;
    let authorisation_id = AuthorisationId::generate();

    let store = SingleAuthorisation {
        authorisation: (!args.cms_unavailable).then(|| {
            Authorisation::new(
                authorisation_id.clone(),
                "cli-consent",
                AuthorisationType::Ais,
                args.approach,
            )
        }),
    };
    let checker = EndpointAccessibilityChecker::new(Arc::new(store), Arc::new(profile));
    let accessible = checker.is_endpoint_accessible(&authorisation_id, args.confirmation_code);

    let report = json!({
        "scaRedirectFlow": flow.to_string(),
        "approach": args.approach.to_string(),
        "confirmationCodeReceived": args.confirmation_code,
        "cmsUnavailable": args.cms_unavailable,
        "accessible": accessible,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if accessible { 0 } else { EXIT_BLOCKED })
}
