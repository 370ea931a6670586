//! # PIIS Consent Validation Service
//!
//! Funds-confirmation consents follow the AIS lifecycle without the
//! advisory validators. Errors are tagged `PIIS_…`.

use std::sync::Arc;

use xs2a_core::{
    AspspProfileService, MessageError, MessageErrorCode, PiisConsent, ServiceType,
};

use crate::checks;
use crate::consent::{
    CommonConsentValidator, CreateConsentAuthorisationValidator,
    GetConsentAuthorisationScaStatusValidator, UpdateConsentPsuDataValidator,
};
use crate::objects::{
    CommonConsentObject, CreateConsentAuthorisationObject, CreatePiisConsentRequestObject,
    GetConsentAuthorisationScaStatusObject, UpdateConsentPsuDataObject,
};
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;

/// Checks a PIIS consent creation request: PSU-ID when mandated, and an
/// account reference.
pub struct CreatePiisConsentValidator {
    profile: Arc<dyn AspspProfileService>,
}

impl CreatePiisConsentValidator {
    pub fn new(profile: Arc<dyn AspspProfileService>) -> Self {
        Self { profile }
    }

    fn run(&self, object: &CreatePiisConsentRequestObject) -> Result<(), MessageError> {
        checks::check_psu_in_initiation(
            ServiceType::Piis,
            &object.psu_id_data,
            self.profile.is_psu_in_initiation_mandated(),
        )?;
        if object.request.account.trim().is_empty() {
            return Err(MessageError::of(ServiceType::Piis, MessageErrorCode::FormatError));
        }
        Ok(())
    }
}

impl BusinessValidator<CreatePiisConsentRequestObject> for CreatePiisConsentValidator {
    fn validate(&self, object: &CreatePiisConsentRequestObject) -> ValidationResult {
        self.run(object).into()
    }
}

/// Lifecycle events of a PIIS consent that pass through validation.
#[derive(Debug, Clone, Copy)]
pub enum PiisOperation<'a> {
    CreateConsent(&'a CreatePiisConsentRequestObject),
    GetConsentById(&'a CommonConsentObject<PiisConsent>),
    GetConsentStatusById(&'a CommonConsentObject<PiisConsent>),
    DeleteConsentById(&'a CommonConsentObject<PiisConsent>),
    CreateAuthorisation(&'a CreateConsentAuthorisationObject<PiisConsent>),
    GetAuthorisations(&'a CommonConsentObject<PiisConsent>),
    GetAuthorisationScaStatus(&'a GetConsentAuthorisationScaStatusObject<PiisConsent>),
    UpdatePsuData(&'a UpdateConsentPsuDataObject<PiisConsent>),
}

impl PiisOperation<'_> {
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

type Validator<O> = Box<dyn BusinessValidator<O>>;

/// The validator instance behind each [`PiisOperation`].
pub struct PiisValidators {
    pub create_consent: Validator<CreatePiisConsentRequestObject>,
    pub get_consent_by_id: Validator<CommonConsentObject<PiisConsent>>,
    pub get_consent_status_by_id: Validator<CommonConsentObject<PiisConsent>>,
    pub delete_consent_by_id: Validator<CommonConsentObject<PiisConsent>>,
    pub create_authorisation: Validator<CreateConsentAuthorisationObject<PiisConsent>>,
    pub get_authorisations: Validator<CommonConsentObject<PiisConsent>>,
    pub get_authorisation_sca_status:
        Validator<GetConsentAuthorisationScaStatusObject<PiisConsent>>,
    pub update_psu_data: Validator<UpdateConsentPsuDataObject<PiisConsent>>,
}

impl PiisValidators {
    pub fn standard(profile: Arc<dyn AspspProfileService>) -> Self {
        Self {
            create_consent: Box::new(CreatePiisConsentValidator::new(profile)),
            get_consent_by_id: Box::new(CommonConsentValidator::new()),
            get_consent_status_by_id: Box::new(CommonConsentValidator::new()),
            delete_consent_by_id: Box::new(CommonConsentValidator::new()),
            create_authorisation: Box::new(CreateConsentAuthorisationValidator::new()),
            get_authorisations: Box::new(CommonConsentValidator::new()),
            get_authorisation_sca_status: Box::new(GetConsentAuthorisationScaStatusValidator::new()),
            update_psu_data: Box::new(UpdateConsentPsuDataValidator::new()),
        }
    }
}

/// Validation entry point for PIIS consent operations.
pub struct PiisValidationService {
    validators: PiisValidators,
}

impl PiisValidationService {
    pub fn new(validators: PiisValidators) -> Self {
        Self { validators }
    }

    pub fn standard(profile: Arc<dyn AspspProfileService>) -> Self {
        Self::new(PiisValidators::standard(profile))
    }

    pub fn validate(&self, operation: PiisOperation<'_>) -> ValidationResult {
        let v = &self.validators;
        let result = match operation {
            PiisOperation::CreateConsent(o) => v.create_consent.validate(o),
            PiisOperation::GetConsentById(o) => v.get_consent_by_id.validate(o),
            PiisOperation::GetConsentStatusById(o) => v.get_consent_status_by_id.validate(o),
            PiisOperation::DeleteConsentById(o) => v.delete_consent_by_id.validate(o),
            PiisOperation::CreateAuthorisation(o) => v.create_authorisation.validate(o),
            PiisOperation::GetAuthorisations(o) => v.get_authorisations.validate(o),
            PiisOperation::GetAuthorisationScaStatus(o) => {
                v.get_authorisation_sca_status.validate(o)
            }
            PiisOperation::UpdatePsuData(o) => v.update_psu_data.validate(o),
        };
        if let Some(error) = result.message_error() {
            tracing::debug!(
                operation = operation.kind(),
                error_type = %error.error_type,
                "PIIS validation failed"
            );
        }
        result
    }

    pub fn validate_consent_on_create(
        &self,
        object: &CreatePiisConsentRequestObject,
    ) -> ValidationResult {
        self.validate(PiisOperation::CreateConsent(object))
    }

    pub fn validate_consent_on_get_by_id(
        &self,
        object: &CommonConsentObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::GetConsentById(object))
    }

    pub fn validate_consent_on_get_status(
        &self,
        object: &CommonConsentObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::GetConsentStatusById(object))
    }

    pub fn validate_consent_on_delete(
        &self,
        object: &CommonConsentObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::DeleteConsentById(object))
    }

    pub fn validate_consent_authorisation_on_create(
        &self,
        object: &CreateConsentAuthorisationObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::CreateAuthorisation(object))
    }

    pub fn validate_consent_authorisations_on_get(
        &self,
        object: &CommonConsentObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::GetAuthorisations(object))
    }

    pub fn validate_consent_authorisation_sca_status(
        &self,
        object: &GetConsentAuthorisationScaStatusObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::GetAuthorisationScaStatus(object))
    }

    pub fn validate_consent_psu_data_on_update(
        &self,
        object: &UpdateConsentPsuDataObject<PiisConsent>,
    ) -> ValidationResult {
        self.validate(PiisOperation::UpdatePsuData(object))
    }
}
