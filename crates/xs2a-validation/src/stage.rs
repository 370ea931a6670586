//! # Authorisation Stage Check
//!
//! Each step of an embedded or decoupled authorisation expects one kind of
//! input from the TPP:
//!
//! | Current status      | Required input            |
//! |---------------------|---------------------------|
//! | RECEIVED            | PSU identification        |
//! | PSUIDENTIFIED       | password                  |
//! | PSUAUTHENTICATED    | authentication method id  |
//! | SCAMETHODSELECTED   | SCA authentication data   |
//!
//! Any other status passes. Missing input is `SERVICE_INVALID` (400),
//! tagged with the authorisation's service; cancellation reports as PIS.

use xs2a_core::{MessageErrorCode, ScaStatus};

use crate::objects::AuthorisationStageObject;
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;

/// Checks that an update carries the input the current step needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorisationStageCheckValidator;

impl AuthorisationStageCheckValidator {
    pub fn new() -> Self {
        Self
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl BusinessValidator<AuthorisationStageObject> for AuthorisationStageCheckValidator {
    fn validate(&self, object: &AuthorisationStageObject) -> ValidationResult {
        let update = &object.update;
        let satisfied = match object.sca_status {
            ScaStatus::Received => update.psu_data.is_not_empty(),
            ScaStatus::PsuIdentified => present(&update.password),
            ScaStatus::PsuAuthenticated => present(&update.authentication_method_id),
            ScaStatus::ScaMethodSelected => present(&update.sca_authentication_data),
            ScaStatus::Started
            | ScaStatus::Finalised
            | ScaStatus::Failed
            | ScaStatus::Exempted => true,
        };
        if satisfied {
            ValidationResult::valid()
        } else {
            ValidationResult::of(
                object.authorisation_type.service_type(),
                MessageErrorCode::ServiceInvalid400,
            )
        }
    }
}
