//! # TPP Notification Data
//!
//! Advisory checks on the `TPP-Notification-*` headers: requested modes the
//! ASPSP does not support, and a notification URI outside the TPP
//! certificate's domains.

use std::sync::Arc;

use xs2a_core::{AspspProfileService, MessageErrorCode, NotificationSupportedMode, TppMessage};

use crate::objects::CreateConsentRequestObject;
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;
use crate::warnings::domain::{is_uri_compliant, tpp_domains};

/// Warns about unsupported notification modes and non-compliant
/// notification URIs.
pub struct TppNotificationDataValidator {
    profile: Arc<dyn AspspProfileService>,
}

impl TppNotificationDataValidator {
    pub fn new(profile: Arc<dyn AspspProfileService>) -> Self {
        Self { profile }
    }
}

impl std::fmt::Debug for TppNotificationDataValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TppNotificationDataValidator")
            .finish_non_exhaustive()
    }
}

impl BusinessValidator<CreateConsentRequestObject> for TppNotificationDataValidator {
    fn validate(&self, _object: &CreateConsentRequestObject) -> ValidationResult {
        ValidationResult::valid()
    }

    fn build_warning_messages(&self, object: &CreateConsentRequestObject) -> Vec<TppMessage> {
        let Some(data) = object.tpp_notification_data.as_ref() else {
            return Vec::new();
        };
        let mut warnings = Vec::new();

        let supported = self.profile.supported_notification_modes();
        let unsupported = data
            .notification_modes
            .iter()
            .any(|mode| *mode != NotificationSupportedMode::None && !supported.contains(mode));
        if unsupported {
            warnings.push(TppMessage::warning(
                MessageErrorCode::FormatErrorInvalidNotificationMode,
            ));
        }

        if self.profile.is_check_uri_compliance_to_domain_supported() {
            if let Some(uri) = data
                .tpp_notification_uri
                .as_deref()
                .filter(|u| !u.trim().is_empty())
            {
                let domains = tpp_domains(&object.tpp_info);
                if !domains.is_empty() && !is_uri_compliant(uri, &domains) {
                    warnings.push(TppMessage::warning(
                        MessageErrorCode::FormatErrorInvalidDomain,
                    ));
                }
            }
        }
        warnings
    }
}
