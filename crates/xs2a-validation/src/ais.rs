//! # AIS Consent Validation Service
//!
//! One validator per account-information consent operation. The service
//! wraps nothing itself: callers build the validation object, name the
//! operation, and receive the validator's [`ValidationResult`] unchanged.
//!
//! ## Dispatch
//!
//! [`AisOperation`] is a closed set of variants. Each variant maps to
//! exactly one field of [`AisValidators`], so adding an operation forces a
//! decision about its validator at compile time.
//!
//! Consent creation additionally runs the advisory validators
//! (TPP domain, notification data) through
//! [`AisValidationService::build_warning_messages`].

use std::sync::Arc;

use chrono::NaiveDate;
use xs2a_core::{
    AisConsent, AspspProfileService, MessageError, MessageErrorCode, ServiceType, TppMessage,
};

use crate::checks;
use crate::consent::{
    utc_today, Clock, CommonConsentValidator, CreateConsentAuthorisationValidator,
    GetConsentAuthorisationScaStatusValidator, UpdateConsentPsuDataValidator,
};
use crate::objects::{
    CommonConsentObject, CreateConsentAuthorisationObject, CreateConsentRequestObject,
    GetConsentAuthorisationScaStatusObject, UpdateConsentPsuDataObject,
};
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;
use crate::warnings::{TppDomainValidator, TppNotificationDataValidator};

// ─── Create Consent ──────────────────────────────────────────────────

/// Checks an AIS consent creation request.
///
/// - PSU-ID present when the profile mandates it (`FORMAT_ERROR`, no PSU).
/// - A one-off consent (`recurringIndicator` false) allows at most one
///   access per day.
/// - `validUntil` must not lie in the past.
pub struct CreateConsentRequestValidator {
    profile: Arc<dyn AspspProfileService>,
    today: Clock,
}

impl CreateConsentRequestValidator {
    pub fn new(profile: Arc<dyn AspspProfileService>) -> Self {
        Self::with_clock(profile, utc_today)
    }

    pub fn with_clock(profile: Arc<dyn AspspProfileService>, today: Clock) -> Self {
        Self { profile, today }
    }

    fn run(&self, object: &CreateConsentRequestObject) -> Result<(), MessageError> {
        checks::check_psu_in_initiation(
            ServiceType::Ais,
            &object.psu_id_data,
            self.profile.is_psu_in_initiation_mandated(),
        )?;
        let request = &object.request;
        if !request.recurring_indicator && request.frequency_per_day > 1 {
            return Err(MessageError::of(ServiceType::Ais, MessageErrorCode::FormatError));
        }
        let today: NaiveDate = (self.today)();
        if request.valid_until < today {
            return Err(MessageError::of(ServiceType::Ais, MessageErrorCode::FormatError));
        }
        Ok(())
    }
}

impl BusinessValidator<CreateConsentRequestObject> for CreateConsentRequestValidator {
    fn validate(&self, object: &CreateConsentRequestObject) -> ValidationResult {
        self.run(object).into()
    }
}

// ─── Operations ──────────────────────────────────────────────────────

/// Lifecycle events of an AIS consent that pass through validation.
#[derive(Debug, Clone, Copy)]
pub enum AisOperation<'a> {
    CreateConsent(&'a CreateConsentRequestObject),
    GetConsentById(&'a CommonConsentObject<AisConsent>),
    GetConsentStatusById(&'a CommonConsentObject<AisConsent>),
    DeleteConsentById(&'a CommonConsentObject<AisConsent>),
    CreateAuthorisation(&'a CreateConsentAuthorisationObject<AisConsent>),
    GetAuthorisations(&'a CommonConsentObject<AisConsent>),
    GetAuthorisationScaStatus(&'a GetConsentAuthorisationScaStatusObject<AisConsent>),
    UpdatePsuData(&'a UpdateConsentPsuDataObject<AisConsent>),
}

impl AisOperation<'_> {
    /// Stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateConsent(_) => "create_consent",
            Self::GetConsentById(_) => "get_consent_by_id",
            Self::GetConsentStatusById(_) => "get_consent_status_by_id",
            Self::DeleteConsentById(_) => "delete_consent_by_id",
            Self::CreateAuthorisation(_) => "create_authorisation",
            Self::GetAuthorisations(_) => "get_authorisations",
            Self::GetAuthorisationScaStatus(_) => "get_authorisation_sca_status",
            Self::UpdatePsuData(_) => "update_psu_data",
        }
    }
}

// ─── Validator Set ───────────────────────────────────────────────────

type Validator<O> = Box<dyn BusinessValidator<O>>;

/// The validator instance behind each [`AisOperation`].
pub struct AisValidators {
    pub create_consent: Validator<CreateConsentRequestObject>,
    pub get_consent_by_id: Validator<CommonConsentObject<AisConsent>>,
    pub get_consent_status_by_id: Validator<CommonConsentObject<AisConsent>>,
    pub delete_consent_by_id: Validator<CommonConsentObject<AisConsent>>,
    pub create_authorisation: Validator<CreateConsentAuthorisationObject<AisConsent>>,
    pub get_authorisations: Validator<CommonConsentObject<AisConsent>>,
    pub get_authorisation_sca_status: Validator<GetConsentAuthorisationScaStatusObject<AisConsent>>,
    pub update_psu_data: Validator<UpdateConsentPsuDataObject<AisConsent>>,
    /// Advisory validators run on consent creation only.
    pub warning_validators: Vec<Validator<CreateConsentRequestObject>>,
}

impl AisValidators {
    /// The production validator set.
    pub fn standard(profile: Arc<dyn AspspProfileService>) -> Self {
        Self {
            create_consent: Box::new(CreateConsentRequestValidator::new(profile.clone())),
            get_consent_by_id: Box::new(CommonConsentValidator::new()),
            get_consent_status_by_id: Box::new(CommonConsentValidator::new()),
            delete_consent_by_id: Box::new(CommonConsentValidator::new()),
            create_authorisation: Box::new(CreateConsentAuthorisationValidator::new()),
            get_authorisations: Box::new(CommonConsentValidator::new()),
            get_authorisation_sca_status: Box::new(GetConsentAuthorisationScaStatusValidator::new()),
            update_psu_data: Box::new(UpdateConsentPsuDataValidator::new()),
            warning_validators: vec![
                Box::new(TppDomainValidator::new(profile.clone())),
                Box::new(TppNotificationDataValidator::new(profile)),
            ],
        }
    }
}

// ─── Service ─────────────────────────────────────────────────────────

/// Validation entry point for AIS consent operations.
pub struct AisValidationService {
    validators: AisValidators,
}

impl AisValidationService {
    pub fn new(validators: AisValidators) -> Self {
        Self { validators }
    }

    pub fn standard(profile: Arc<dyn AspspProfileService>) -> Self {
        Self::new(AisValidators::standard(profile))
    }

    /// Run the validator mapped to `operation`.
    pub fn validate(&self, operation: AisOperation<'_>) -> ValidationResult {
        let v = &self.validators;
        let result = match operation {
            AisOperation::CreateConsent(o) => v.create_consent.validate(o),
            AisOperation::GetConsentById(o) => v.get_consent_by_id.validate(o),
            AisOperation::GetConsentStatusById(o) => v.get_consent_status_by_id.validate(o),
            AisOperation::DeleteConsentById(o) => v.delete_consent_by_id.validate(o),
            AisOperation::CreateAuthorisation(o) => v.create_authorisation.validate(o),
            AisOperation::GetAuthorisations(o) => v.get_authorisations.validate(o),
            AisOperation::GetAuthorisationScaStatus(o) => {
                v.get_authorisation_sca_status.validate(o)
            }
            AisOperation::UpdatePsuData(o) => v.update_psu_data.validate(o),
        };
        if let Some(error) = result.message_error() {
            tracing::debug!(
                operation = operation.kind(),
                error_type = %error.error_type,
                "AIS validation failed"
            );
        }
        result
    }

    pub fn validate_consent_on_create(&self, object: &CreateConsentRequestObject) -> ValidationResult {
        self.validate(AisOperation::CreateConsent(object))
    }

    pub fn validate_consent_on_get_by_id(
        &self,
        object: &CommonConsentObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::GetConsentById(object))
    }

    pub fn validate_consent_on_get_status(
        &self,
        object: &CommonConsentObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::GetConsentStatusById(object))
    }

    pub fn validate_consent_on_delete(
        &self,
        object: &CommonConsentObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::DeleteConsentById(object))
    }

    pub fn validate_consent_authorisation_on_create(
        &self,
        object: &CreateConsentAuthorisationObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::CreateAuthorisation(object))
    }

    pub fn validate_consent_authorisations_on_get(
        &self,
        object: &CommonConsentObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::GetAuthorisations(object))
    }

    pub fn validate_consent_authorisation_sca_status(
        &self,
        object: &GetConsentAuthorisationScaStatusObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::GetAuthorisationScaStatus(object))
    }

    pub fn validate_consent_psu_data_on_update(
        &self,
        object: &UpdateConsentPsuDataObject<AisConsent>,
    ) -> ValidationResult {
        self.validate(AisOperation::UpdatePsuData(object))
    }

    /// Advisory messages for a consent creation request: the union of the
    /// creation validator's warnings and every warning validator's, in
    /// that order. Duplicates are kept.
    pub fn build_warning_messages(&self, object: &CreateConsentRequestObject) -> Vec<TppMessage> {
        let mut warnings = self.validators.create_consent.build_warning_messages(object);
        for validator in &self.validators.warning_validators {
            warnings.extend(validator.build_warning_messages(object));
        }
        warnings
    }
}
