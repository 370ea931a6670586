//! # PIS Validation Service
//!
//! Payment operations, covering both the initiation and the cancellation
//! authorisation lists of a payment. Every operation after creation checks
//! the TPP and the request path (payment type and product) first.
//!
//! The authorisation validators are parameterised by
//! [`AuthorisationType`]: the same rules apply to initiation
//! ([`AuthorisationType::Pis`]) and cancellation
//! ([`AuthorisationType::PisCancellation`]) authorisations, each looked up
//! in its own list.

use std::sync::Arc;

use xs2a_core::{AspspProfileService, AuthorisationType, MessageError, ServiceType};

use crate::checks;
use crate::objects::{
    CommonPaymentObject, CreatePaymentRequestObject, CreatePisAuthorisationObject,
    GetPaymentScaStatusObject, UpdatePisPsuDataObject,
};
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;

const SERVICE: ServiceType = ServiceType::Pis;

// ─── Payment Validators ──────────────────────────────────────────────

/// Payment initiation: PSU-ID when the profile mandates it.
pub struct CreatePaymentValidator {
    profile: Arc<dyn AspspProfileService>,
}

impl CreatePaymentValidator {
    pub fn new(profile: Arc<dyn AspspProfileService>) -> Self {
        Self { profile }
    }
}

impl BusinessValidator<CreatePaymentRequestObject> for CreatePaymentValidator {
    fn validate(&self, object: &CreatePaymentRequestObject) -> ValidationResult {
        checks::check_psu_in_initiation(
            SERVICE,
            &object.psu_id_data,
            self.profile.is_psu_in_initiation_mandated(),
        )
        .into()
    }
}

/// TPP and request path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonPaymentValidator;

impl CommonPaymentValidator {
    pub fn new() -> Self {
        Self
    }
}

impl BusinessValidator<CommonPaymentObject> for CommonPaymentValidator {
    fn validate(&self, object: &CommonPaymentObject) -> ValidationResult {
        let run = || -> Result<(), MessageError> {
            checks::check_tpp(SERVICE, &object.payment.tpp_info, &object.tpp_info)?;
            checks::check_payment_path(&object.payment, &object.path)
        };
        run().into()
    }
}

/// TPP, request path, and a transaction status that still allows
/// cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelPaymentValidator;

impl CancelPaymentValidator {
    pub fn new() -> Self {
        Self
    }
}

impl BusinessValidator<CommonPaymentObject> for CancelPaymentValidator {
    fn validate(&self, object: &CommonPaymentObject) -> ValidationResult {
        let run = || -> Result<(), MessageError> {
            checks::check_tpp(SERVICE, &object.payment.tpp_info, &object.tpp_info)?;
            checks::check_payment_path(&object.payment, &object.path)?;
            checks::check_payment_cancellable(&object.payment)
        };
        run().into()
    }
}

// ─── Authorisation Validators ────────────────────────────────────────

/// Start of an initiation or cancellation authorisation.
///
/// Cancellation authorisations also require a payment that can still be
/// cancelled.
#[derive(Debug, Clone, Copy)]
pub struct CreatePaymentAuthorisationValidator {
    authorisation_type: AuthorisationType,
}

impl CreatePaymentAuthorisationValidator {
    pub fn new(authorisation_type: AuthorisationType) -> Self {
        Self { authorisation_type }
    }
}

impl BusinessValidator<CreatePisAuthorisationObject> for CreatePaymentAuthorisationValidator {
    fn validate(&self, object: &CreatePisAuthorisationObject) -> ValidationResult {
        let payment = &object.payment;
        let run = || -> Result<(), MessageError> {
            checks::check_tpp(SERVICE, &payment.tpp_info, &object.tpp_info)?;
            checks::check_payment_path(payment, &object.path)?;
            if self.authorisation_type == AuthorisationType::PisCancellation {
                checks::check_payment_cancellable(payment)?;
            }
            checks::check_psu_for_new_authorisation(SERVICE, payment, &object.psu_id_data)?;
            checks::check_no_finalised_authorisation_for_psu(
                SERVICE,
                payment,
                &object.psu_id_data,
                self.authorisation_type,
            )
        };
        run().into()
    }
}

/// Read of an initiation or cancellation authorisation's SCA status.
#[derive(Debug, Clone, Copy)]
pub struct PaymentAuthorisationScaStatusValidator {
    authorisation_type: AuthorisationType,
}

impl PaymentAuthorisationScaStatusValidator {
    pub fn new(authorisation_type: AuthorisationType) -> Self {
        Self { authorisation_type }
    }
}

impl BusinessValidator<GetPaymentScaStatusObject> for PaymentAuthorisationScaStatusValidator {
    fn validate(&self, object: &GetPaymentScaStatusObject) -> ValidationResult {
        let payment = &object.payment;
        let run = || -> Result<(), MessageError> {
            checks::check_tpp(SERVICE, &payment.tpp_info, &object.tpp_info)?;
            checks::check_payment_path(payment, &object.path)?;
            checks::check_authorisation_belongs(
                SERVICE,
                payment,
                &object.authorisation_id,
                self.authorisation_type,
            )?;
            Ok(())
        };
        run().into()
    }
}

/// PSU data update on an initiation or cancellation authorisation.
#[derive(Debug, Clone, Copy)]
pub struct UpdatePaymentPsuDataValidator {
    authorisation_type: AuthorisationType,
}

impl UpdatePaymentPsuDataValidator {
    pub fn new(authorisation_type: AuthorisationType) -> Self {
        Self { authorisation_type }
    }
}

impl BusinessValidator<UpdatePisPsuDataObject> for UpdatePaymentPsuDataValidator {
    fn validate(&self, object: &UpdatePisPsuDataObject) -> ValidationResult {
        let payment = &object.payment;
        let run = || -> Result<(), MessageError> {
            checks::check_tpp(SERVICE, &payment.tpp_info, &object.tpp_info)?;
            checks::check_payment_path(payment, &object.path)?;
            let authorisation = checks::check_authorisation_belongs(
                SERVICE,
                payment,
                &object.update.authorisation_id,
                self.authorisation_type,
            )?;
            checks::check_authorisation_not_terminal(SERVICE, authorisation)?;
            checks::check_psu_for_update(SERVICE, authorisation, &object.update.psu_data)
        };
        run().into()
    }
}

// ─── Operations ──────────────────────────────────────────────────────

/// Lifecycle events of a payment that pass through validation.
#[derive(Debug, Clone, Copy)]
pub enum PisOperation<'a> {
    CreatePayment(&'a CreatePaymentRequestObject),
    GetPaymentById(&'a CommonPaymentObject),
    GetPaymentStatusById(&'a CommonPaymentObject),
    CancelPayment(&'a CommonPaymentObject),
    CreateAuthorisation(&'a CreatePisAuthorisationObject),
    GetAuthorisations(&'a CommonPaymentObject),
    GetAuthorisationScaStatus(&'a GetPaymentScaStatusObject),
    UpdatePsuData(&'a UpdatePisPsuDataObject),
    CreateCancellationAuthorisation(&'a CreatePisAuthorisationObject),
    GetCancellationAuthorisations(&'a CommonPaymentObject),
    GetCancellationScaStatus(&'a GetPaymentScaStatusObject),
    UpdateCancellationPsuData(&'a UpdatePisPsuDataObject),
}

impl PisOperation<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreatePayment(_) => "create_payment",
            Self::GetPaymentById(_) => "get_payment_by_id",
            Self::GetPaymentStatusById(_) => "get_payment_status_by_id",
            Self::CancelPayment(_) => "cancel_payment",
            Self::CreateAuthorisation(_) => "create_authorisation",
            Self::GetAuthorisations(_) => "get_authorisations",
            Self::GetAuthorisationScaStatus(_) => "get_authorisation_sca_status",
            Self::UpdatePsuData(_) => "update_psu_data",
            Self::CreateCancellationAuthorisation(_) => "create_cancellation_authorisation",
            Self::GetCancellationAuthorisations(_) => "get_cancellation_authorisations",
            Self::GetCancellationScaStatus(_) => "get_cancellation_sca_status",
            Self::UpdateCancellationPsuData(_) => "update_cancellation_psu_data",
        }
    }
}

type Validator<O> = Box<dyn BusinessValidator<O>>;

/// The validator instance behind each [`PisOperation`].
pub struct PisValidators {
    pub create_payment: Validator<CreatePaymentRequestObject>,
    pub get_payment_by_id: Validator<CommonPaymentObject>,
    pub get_payment_status_by_id: Validator<CommonPaymentObject>,
    pub cancel_payment: Validator<CommonPaymentObject>,
    pub create_authorisation: Validator<CreatePisAuthorisationObject>,
    pub get_authorisations: Validator<CommonPaymentObject>,
    pub get_authorisation_sca_status: Validator<GetPaymentScaStatusObject>,
    pub update_psu_data: Validator<UpdatePisPsuDataObject>,
    pub create_cancellation_authorisation: Validator<CreatePisAuthorisationObject>,
    pub get_cancellation_authorisations: Validator<CommonPaymentObject>,
    pub get_cancellation_sca_status: Validator<GetPaymentScaStatusObject>,
    pub update_cancellation_psu_data: Validator<UpdatePisPsuDataObject>,
}

impl PisValidators {
    pub fn standard(profile: Arc<dyn AspspProfileService>) -> Self {
        use AuthorisationType::{Pis, PisCancellation};
        Self {
            create_payment: Box::new(CreatePaymentValidator::new(profile)),
            get_payment_by_id: Box::new(CommonPaymentValidator::new()),
            get_payment_status_by_id: Box::new(CommonPaymentValidator::new()),
            cancel_payment: Box::new(CancelPaymentValidator::new()),
            create_authorisation: Box::new(CreatePaymentAuthorisationValidator::new(Pis)),
            get_authorisations: Box::new(CommonPaymentValidator::new()),
            get_authorisation_sca_status: Box::new(PaymentAuthorisationScaStatusValidator::new(
                Pis,
            )),
            update_psu_data: Box::new(UpdatePaymentPsuDataValidator::new(Pis)),
            create_cancellation_authorisation: Box::new(
                CreatePaymentAuthorisationValidator::new(PisCancellation),
            ),
            get_cancellation_authorisations: Box::new(CommonPaymentValidator::new()),
            get_cancellation_sca_status: Box::new(PaymentAuthorisationScaStatusValidator::new(
                PisCancellation,
            )),
            update_cancellation_psu_data: Box::new(UpdatePaymentPsuDataValidator::new(
                PisCancellation,
            )),
        }
    }
}

/// Validation entry point for payment operations.
pub struct PisValidationService {
    validators: PisValidators,
}

impl PisValidationService {
    pub fn new(validators: PisValidators) -> Self {
        Self { validators }
    }

    pub fn standard(profile: Arc<dyn AspspProfileService>) -> Self {
        Self::new(PisValidators::standard(profile))
    }

    pub fn validate(&self, operation: PisOperation<'_>) -> ValidationResult {
        let v = &self.validators;
        let result = match operation {
            PisOperation::CreatePayment(o) => v.create_payment.validate(o),
            PisOperation::GetPaymentById(o) => v.get_payment_by_id.validate(o),
            PisOperation::GetPaymentStatusById(o) => v.get_payment_status_by_id.validate(o),
            PisOperation::CancelPayment(o) => v.cancel_payment.validate(o),
            PisOperation::CreateAuthorisation(o) => v.create_authorisation.validate(o),
            PisOperation::GetAuthorisations(o) => v.get_authorisations.validate(o),
            PisOperation::GetAuthorisationScaStatus(o) => {
                v.get_authorisation_sca_status.validate(o)
            }
            PisOperation::UpdatePsuData(o) => v.update_psu_data.validate(o),
            PisOperation::CreateCancellationAuthorisation(o) => {
                v.create_cancellation_authorisation.validate(o)
            }
            PisOperation::GetCancellationAuthorisations(o) => {
                v.get_cancellation_authorisations.validate(o)
            }
            PisOperation::GetCancellationScaStatus(o) => v.get_cancellation_sca_status.validate(o),
            PisOperation::UpdateCancellationPsuData(o) => {
                v.update_cancellation_psu_data.validate(o)
            }
        };
        if let Some(error) = result.message_error() {
            tracing::debug!(
                operation = operation.kind(),
                error_type = %error.error_type,
                "PIS validation failed"
            );
        }
        result
    }

    pub fn validate_payment_on_create(&self, object: &CreatePaymentRequestObject) -> ValidationResult {
        self.validate(PisOperation::CreatePayment(object))
    }

    pub fn validate_payment_on_get_by_id(&self, object: &CommonPaymentObject) -> ValidationResult {
        self.validate(PisOperation::GetPaymentById(object))
    }

    pub fn validate_payment_on_get_status(&self, object: &CommonPaymentObject) -> ValidationResult {
        self.validate(PisOperation::GetPaymentStatusById(object))
    }

    pub fn validate_payment_on_cancel(&self, object: &CommonPaymentObject) -> ValidationResult {
        self.validate(PisOperation::CancelPayment(object))
    }

    pub fn validate_authorisation_on_create(
        &self,
        object: &CreatePisAuthorisationObject,
    ) -> ValidationResult {
        self.validate(PisOperation::CreateAuthorisation(object))
    }

    pub fn validate_authorisations_on_get(&self, object: &CommonPaymentObject) -> ValidationResult {
        self.validate(PisOperation::GetAuthorisations(object))
    }

    pub fn validate_authorisation_sca_status(
        &self,
        object: &GetPaymentScaStatusObject,
    ) -> ValidationResult {
        self.validate(PisOperation::GetAuthorisationScaStatus(object))
    }

    pub fn validate_psu_data_on_update(&self, object: &UpdatePisPsuDataObject) -> ValidationResult {
        self.validate(PisOperation::UpdatePsuData(object))
    }

    pub fn validate_cancellation_authorisation_on_create(
        &self,
        object: &CreatePisAuthorisationObject,
    ) -> ValidationResult {
        self.validate(PisOperation::CreateCancellationAuthorisation(object))
    }

    pub fn validate_cancellation_authorisations_on_get(
        &self,
        object: &CommonPaymentObject,
    ) -> ValidationResult {
        self.validate(PisOperation::GetCancellationAuthorisations(object))
    }

    pub fn validate_cancellation_sca_status(
        &self,
        object: &GetPaymentScaStatusObject,
    ) -> ValidationResult {
        self.validate(PisOperation::GetCancellationScaStatus(object))
    }

    pub fn validate_cancellation_psu_data_on_update(
        &self,
        object: &UpdatePisPsuDataObject,
    ) -> ValidationResult {
        self.validate(PisOperation::UpdateCancellationPsuData(object))
    }
}
