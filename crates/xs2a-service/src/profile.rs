//! # ASPSP Profile
//!
//! Deployment settings of the bank, loaded from YAML. Every field has a
//! default, so an empty document is a valid profile: REDIRECT flow, every
//! feature off, no notification modes, REDIRECT as the only approach.
//!
//! ```yaml
//! sca_redirect_flow: OAUTH
//! authorisation_confirmation_request_mandated: true
//! check_uri_compliance_to_domain_supported: true
//! supported_notification_modes: [SCA, LAST]
//! sca_approaches: [REDIRECT, EMBEDDED]
//! ```
//!
//! Unknown keys are rejected so a misspelt switch cannot silently fall
//! back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xs2a_core::{AspspProfileService, NotificationSupportedMode, ScaApproach, ScaRedirectFlow};

/// Errors while loading a profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile file could not be read.
    #[error("cannot read profile {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not a valid profile.
    #[error("malformed profile: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },

    /// The profile parsed but is inconsistent.
    #[error("inconsistent profile: {}", problems.join("; "))]
    Invalid {
        /// Every problem found by [`AspspProfile::validate`].
        problems: Vec<String>,
    },
}

/// ASPSP deployment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AspspProfile {
    pub sca_redirect_flow: ScaRedirectFlow,
    pub authorisation_confirmation_request_mandated: bool,
    pub trusted_beneficiaries_supported: bool,
    pub account_owner_information_supported: bool,
    pub check_uri_compliance_to_domain_supported: bool,
    pub psu_in_initiation_mandated: bool,
    pub supported_notification_modes: Vec<NotificationSupportedMode>,
    /// SCA approaches offered, in order of preference.
    pub sca_approaches: Vec<ScaApproach>,
}

impl Default for AspspProfile {
    fn default() -> Self {
        Self {
            sca_redirect_flow: ScaRedirectFlow::Redirect,
            authorisation_confirmation_request_mandated: false,
            trusted_beneficiaries_supported: false,
            account_owner_information_supported: false,
            check_uri_compliance_to_domain_supported: false,
            psu_in_initiation_mandated: false,
            supported_notification_modes: Vec::new(),
            sca_approaches: vec![ScaApproach::Redirect],
        }
    }
}

impl AspspProfile {
    /// Parse a profile from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ProfileError::Parse {
            reason: e.to_string(),
        })
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ProfileError> {
        serde_yaml::to_string(self).map_err(|e| ProfileError::Parse {
            reason: e.to_string(),
        })
    }

    /// Read and parse a profile file, then reject it if
    /// [`validate`](Self::validate) reports problems.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_yaml(&yaml)?;
        let problems = profile.validate();
        if !problems.is_empty() {
            return Err(ProfileError::Invalid { problems });
        }
        tracing::debug!(
            path = %path.display(),
            flow = %profile.sca_redirect_flow,
            "ASPSP profile loaded"
        );
        Ok(profile)
    }

    /// Consistency problems; empty when the profile is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.authorisation_confirmation_request_mandated
            && self.sca_redirect_flow == ScaRedirectFlow::OauthPreStep
        {
            problems.push(
                "authorisation confirmation cannot be mandated with the OAUTH_PRE_STEP redirect flow"
                    .to_string(),
            );
        }
        if self.sca_approaches.is_empty() {
            problems.push("at least one SCA approach must be offered".to_string());
        }
        for (i, approach) in self.sca_approaches.iter().enumerate() {
            if self.sca_approaches[..i].contains(approach) {
                problems.push(format!("SCA approach {approach} is listed more than once"));
            }
        }
        if self.sca_redirect_flow != ScaRedirectFlow::Redirect
            && !self.sca_approaches.contains(&ScaApproach::Redirect)
        {
            problems.push(format!(
                "redirect flow {} requires the REDIRECT approach",
                self.sca_redirect_flow
            ));
        }
        let modes = &self.supported_notification_modes;
        if modes.contains(&NotificationSupportedMode::None) && modes.len() > 1 {
            problems.push("notification mode NONE cannot be combined with other modes".to_string());
        }
        problems
    }
}

impl AspspProfileService for AspspProfile {
    fn sca_redirect_flow(&self) -> ScaRedirectFlow {
        self.sca_redirect_flow
    }

    fn is_authorisation_confirmation_request_mandated(&self) -> bool {
        self.authorisation_confirmation_request_mandated
    }

    fn is_trusted_beneficiaries_supported(&self) -> bool {
        self.trusted_beneficiaries_supported
    }

    fn is_account_owner_information_supported(&self) -> bool {
        self.account_owner_information_supported
    }

    fn is_check_uri_compliance_to_domain_supported(&self) -> bool {
        self.check_uri_compliance_to_domain_supported
    }

    fn is_psu_in_initiation_mandated(&self) -> bool {
        self.psu_in_initiation_mandated
    }

    fn supported_notification_modes(&self) -> Vec<NotificationSupportedMode> {
        self.supported_notification_modes.clone()
    }
}
