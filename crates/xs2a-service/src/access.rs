//! # Endpoint Accessibility Checker
//!
//! Decides whether the PSU-data update endpoint of an authorisation may be
//! called at all, before any validation or adapter call happens.
//!
//! ## Decision
//!
//! | Redirect flow | Chosen approach      | Accessible                             |
//! |---------------|----------------------|----------------------------------------|
//! | OAUTH         | (not fetched)        | code received and confirmation mandated |
//! | other         | record fetch failed  | yes                                    |
//! | other         | REDIRECT             | code received and confirmation mandated |
//! | other         | DECOUPLED            | no                                     |
//! | other         | EMBEDDED, OAUTH      | yes                                    |
//!
//! A failed record fetch leaves the endpoint open: the endpoint validates
//! the authorisation itself and answers with the precise error.

use std::sync::Arc;

use xs2a_core::{AspspProfileService, AuthorisationId, ScaApproach, ScaRedirectFlow};

use crate::cms::AuthorisationCms;

/// Accessibility decision for authorisation endpoints.
pub struct EndpointAccessibilityChecker {
    authorisation_cms: Arc<dyn AuthorisationCms>,
    profile: Arc<dyn AspspProfileService>,
}

impl EndpointAccessibilityChecker {
    pub fn new(
        authorisation_cms: Arc<dyn AuthorisationCms>,
        profile: Arc<dyn AspspProfileService>,
    ) -> Self {
        Self {
            authorisation_cms,
            profile,
        }
    }

    /// Whether the update endpoint of `authorisation_id` may be invoked.
    pub fn is_endpoint_accessible(
        &self,
        authorisation_id: &AuthorisationId,
        confirmation_code_received: bool,
    ) -> bool {
        let confirmation_expected = confirmation_code_received
            && self.profile.is_authorisation_confirmation_request_mandated();

        if self.profile.sca_redirect_flow() == ScaRedirectFlow::Oauth {
            return confirmation_expected;
        }

        match self.authorisation_cms.get_authorisation_by_id(authorisation_id) {
            Err(e) => {
                tracing::warn!(
                    authorisation_id = %authorisation_id,
                    error = %e,
                    "authorisation lookup failed, leaving endpoint accessible"
                );
                true
            }
            Ok(authorisation) => match authorisation.chosen_sca_approach {
                ScaApproach::Redirect => confirmation_expected,
                ScaApproach::Decoupled => false,
                ScaApproach::Embedded | ScaApproach::Oauth => true,
            },
        }
    }
}
