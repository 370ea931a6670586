//! # ASPSP Profile Contract
//!
//! Read-only view of the bank's deployment settings. Validators and the
//! service layer depend on this trait; `xs2a-service` provides the
//! YAML-backed implementation.

use crate::sca::ScaRedirectFlow;
use crate::tpp::NotificationSupportedMode;

/// Deployment settings consulted while deciding on SCA operations.
///
/// Implementations must be `Send + Sync` so they can be shared behind an
/// `Arc` by every validator and service.
pub trait AspspProfileService: Send + Sync {
    /// Redirect flow used for redirect-approach authorisations.
    fn sca_redirect_flow(&self) -> ScaRedirectFlow;

    /// Whether the TPP must confirm a redirect authorisation with the code
    /// it received from the ASPSP.
    fn is_authorisation_confirmation_request_mandated(&self) -> bool;

    /// Whether the ASPSP reports trusted-beneficiary flags for payments.
    fn is_trusted_beneficiaries_supported(&self) -> bool;

    /// Whether account-owner information may be requested in AIS consents.
    fn is_account_owner_information_supported(&self) -> bool;

    /// Whether TPP redirect/notification URIs are checked against the
    /// domains of the TPP certificate.
    fn is_check_uri_compliance_to_domain_supported(&self) -> bool;

    /// Whether a PSU-ID is required when a consent or payment is created.
    fn is_psu_in_initiation_mandated(&self) -> bool;

    /// Notification modes the ASPSP supports.
    fn supported_notification_modes(&self) -> Vec<NotificationSupportedMode>;
}
