//! # Authorisation Status Services
//!
//! Per-domain services that answer two questions about an authorisation
//! before the bank adapter is involved:
//!
//! - **What is its status?** [`AuthorisationStatusService::get_authorisation_sca_status`]
//!   looks up the consent or payment, validates the request against it,
//!   fetches the authorisation record from the CMS and returns a
//!   [`ScaStatusEnvelope`]. The SCA status resolver consumes these.
//! - **May this PSU-data update proceed?** `check_psu_data_update` runs the
//!   accessibility decision, the update validator and the stage check, and
//!   moves the authorisation to FAILED when the PSU could not be
//!   identified. Consent expiry is checked only after that, so a wrong PSU
//!   fails the authorisation even on an expired consent.
//!
//! Validation goes through the injected [`AisValidationService`],
//! [`PiisValidationService`] or [`PisValidationService`], so a deployment
//! can swap individual validators without touching these services.
//!
//! ## Error Codes
//!
//! | Failure                          | Consent            | Payment                |
//! |----------------------------------|--------------------|------------------------|
//! | resource not found               | S_403 CONSENT_UNKNOWN_403 | PIS_404 RESOURCE_UNKNOWN_404 |
//! | authorisation record not fetched | S_403 RESOURCE_UNKNOWN_403 (status), S_403 CONSENT_UNKNOWN_403 (update) | PIS_403 RESOURCE_UNKNOWN_403 |
//! | endpoint not accessible          | S_403 SERVICE_BLOCKED | PIS_403 SERVICE_BLOCKED |

use std::sync::Arc;

use xs2a_core::{
    AisConsent, Authorisation, AuthorisationId, AuthorisationParent, AuthorisationType,
    CommonPayment, ConsentId, MessageError, MessageErrorCode, PaymentId, PiisConsent, PsuIdData,
    ResponseObject, ScaApproach, ScaStatus, ServiceType, TppInfo,
};
use xs2a_state::AuthorisationLifecycle;
use xs2a_validation::consent::{utc_today, Clock};
use xs2a_validation::{
    checks, AisValidationService, AuthorisationStageCheckValidator, AuthorisationStageObject,
    BusinessValidator, ConsentResource, GetConsentAuthorisationScaStatusObject,
    GetPaymentScaStatusObject, PaymentRequestPath, PiisValidationService, PisValidationService,
    UpdateAuthorisationRequest, UpdateConsentPsuDataObject, UpdatePisPsuDataObject,
    ValidationResult,
};

use crate::access::EndpointAccessibilityChecker;
use crate::cms::{AuthorisationCms, ConsentCms, PaymentCms};

// ─── Envelope and Requests ───────────────────────────────────────────

/// Status of an authorisation together with the PSU and business object
/// the bank adapter needs to refresh it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaStatusEnvelope<B> {
    pub psu_id_data: PsuIdData,
    pub business_object: B,
    pub sca_status: ScaStatus,
    /// The CMS record the status was read from.
    pub authorisation: Authorisation,
}

/// Request addressing one authorisation.
pub trait ScaStatusQuery {
    fn authorisation_id(&self) -> &AuthorisationId;

    fn tpp_info(&self) -> &TppInfo;
}

/// Status read of a consent authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentScaStatusRequest {
    pub consent_id: ConsentId,
    pub authorisation_id: AuthorisationId,
    pub tpp_info: TppInfo,
}

impl ScaStatusQuery for ConsentScaStatusRequest {
    fn authorisation_id(&self) -> &AuthorisationId {
        &self.authorisation_id
    }

    fn tpp_info(&self) -> &TppInfo {
        &self.tpp_info
    }
}

/// Status read of a payment initiation or cancellation authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentScaStatusRequest {
    pub payment_id: PaymentId,
    pub path: PaymentRequestPath,
    pub authorisation_id: AuthorisationId,
    pub tpp_info: TppInfo,
}

impl ScaStatusQuery for PaymentScaStatusRequest {
    fn authorisation_id(&self) -> &AuthorisationId {
        &self.authorisation_id
    }

    fn tpp_info(&self) -> &TppInfo {
        &self.tpp_info
    }
}

/// PSU-data update on a consent authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentPsuDataUpdate {
    pub consent_id: ConsentId,
    pub tpp_info: TppInfo,
    pub update: UpdateAuthorisationRequest,
}

/// PSU-data update on a payment authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPsuDataUpdate {
    pub payment_id: PaymentId,
    pub path: PaymentRequestPath,
    pub tpp_info: TppInfo,
    pub update: UpdateAuthorisationRequest,
}

// ─── Service Contract ────────────────────────────────────────────────

/// Produces the status envelope for one authorisation type.
pub trait AuthorisationStatusService: Send + Sync {
    type Request: ScaStatusQuery;
    type Resource: AuthorisationParent + Send + Sync + 'static;

    fn authorisation_type(&self) -> AuthorisationType;

    /// Service domain used to tag errors.
    fn service_type(&self) -> ServiceType {
        self.authorisation_type().service_type()
    }

    fn get_authorisation_sca_status(
        &self,
        request: &Self::Request,
    ) -> ResponseObject<ScaStatusEnvelope<Self::Resource>>;
}

// ─── Shared Steps ────────────────────────────────────────────────────

/// Steps common to every domain.
struct AuthorisationSteps {
    authorisation_cms: Arc<dyn AuthorisationCms>,
    accessibility: Arc<EndpointAccessibilityChecker>,
    stage_check: AuthorisationStageCheckValidator,
}

impl AuthorisationSteps {
    fn envelope<R: AuthorisationParent>(
        &self,
        resource: R,
        authorisation_id: &AuthorisationId,
        service_type: ServiceType,
    ) -> ResponseObject<ScaStatusEnvelope<R>> {
        let authorisation = match self.authorisation_cms.get_authorisation_by_id(authorisation_id)
        {
            Ok(authorisation) => authorisation,
            Err(e) => {
                tracing::info!(
                    authorisation_id = %authorisation_id,
                    service = %service_type,
                    error = %e,
                    "authorisation record not available for status read"
                );
                return ResponseObject::failure(MessageError::of(
                    service_type,
                    MessageErrorCode::ResourceUnknown403,
                ));
            }
        };
        let psu_id_data = authorisation
            .psu_id_data
            .clone()
            .or_else(|| resource.first_psu().cloned())
            .unwrap_or_default();
        ResponseObject::success(ScaStatusEnvelope {
            psu_id_data,
            business_object: resource,
            sca_status: authorisation.sca_status,
            authorisation,
        })
    }

    fn check_accessible(
        &self,
        update: &UpdateAuthorisationRequest,
        service_type: ServiceType,
    ) -> Result<(), MessageError> {
        let code_received = update
            .confirmation_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty());
        if self
            .accessibility
            .is_endpoint_accessible(&update.authorisation_id, code_received)
        {
            Ok(())
        } else {
            tracing::info!(
                authorisation_id = %update.authorisation_id,
                service = %service_type,
                "PSU data update blocked for this authorisation"
            );
            Err(MessageError::of(service_type, MessageErrorCode::ServiceBlocked))
        }
    }

    /// On a PSU identification failure the authorisation cannot continue:
    /// move it to FAILED before the error goes back to the TPP.
    fn fail_on_psu_error(
        &self,
        error: &MessageError,
        update: &UpdateAuthorisationRequest,
        service_type: ServiceType,
    ) {
        if !error.contains(MessageErrorCode::PsuCredentialsInvalid)
            && !error.contains(MessageErrorCode::FormatErrorNoPsu)
        {
            return;
        }
        let id = &update.authorisation_id;
        let authorisation = match self.authorisation_cms.get_authorisation_by_id(id) {
            Ok(authorisation) => authorisation,
            Err(e) => {
                tracing::warn!(
                    authorisation_id = %id,
                    error = %e,
                    "cannot fail authorisation, record not available"
                );
                return;
            }
        };
        let mut lifecycle = AuthorisationLifecycle::new(authorisation);
        if let Err(e) = lifecycle.fail("PSU could not be identified") {
            tracing::debug!(authorisation_id = %id, error = %e, "authorisation already terminal");
            return;
        }
        match self
            .authorisation_cms
            .update_authorisation_status(id, lifecycle.status())
        {
            Ok(()) => tracing::info!(
                authorisation_id = %id,
                service = %service_type,
                psu = ?xs2a_core::clear(Some(&update.psu_data)),
                "authorisation moved to FAILED"
            ),
            Err(e) => tracing::warn!(
                authorisation_id = %id,
                error = %e,
                "failed to persist FAILED status"
            ),
        }
    }

    fn stage_check(
        &self,
        authorisation: &Authorisation,
        update: &UpdateAuthorisationRequest,
    ) -> Result<(), MessageError> {
        if authorisation.chosen_sca_approach == ScaApproach::Redirect {
            return Ok(());
        }
        self.stage_check
            .validate(&AuthorisationStageObject {
                update: update.clone(),
                sca_status: authorisation.sca_status,
                authorisation_type: authorisation.authorisation_type,
            })
            .into_result()
    }

    /// Everything after the domain validator passed: fetch the record and
    /// check it expects this input.
    fn finish_update(
        &self,
        update: &UpdateAuthorisationRequest,
        service_type: ServiceType,
        fetch_failure: MessageErrorCode,
    ) -> Result<Authorisation, MessageError> {
        let authorisation = self
            .authorisation_cms
            .get_authorisation_by_id(&update.authorisation_id)
            .map_err(|e| {
                tracing::info!(
                    authorisation_id = %update.authorisation_id,
                    error = %e,
                    "authorisation record not available for update"
                );
                MessageError::of(service_type, fetch_failure)
            })?;
        self.stage_check(&authorisation, update)?;
        Ok(authorisation)
    }
}

// ─── Consents ────────────────────────────────────────────────────────

/// A consent type the CMS can look up, paired with the validation service
/// for its domain.
pub trait StoredConsent: ConsentResource + Clone + 'static {
    type Validation: Send + Sync;

    fn fetch(cms: &dyn ConsentCms, consent_id: &ConsentId) -> Option<Self>;

    fn validate_sca_status_read(
        validation: &Self::Validation,
        object: &GetConsentAuthorisationScaStatusObject<Self>,
    ) -> ValidationResult;

    fn validate_psu_data_update(
        validation: &Self::Validation,
        object: &UpdateConsentPsuDataObject<Self>,
    ) -> ValidationResult;
}

impl StoredConsent for AisConsent {
    type Validation = AisValidationService;

    fn fetch(cms: &dyn ConsentCms, consent_id: &ConsentId) -> Option<Self> {
        cms.get_ais_consent_by_id(consent_id)
    }

    fn validate_sca_status_read(
        validation: &AisValidationService,
        object: &GetConsentAuthorisationScaStatusObject<Self>,
    ) -> ValidationResult {
        validation.validate_consent_authorisation_sca_status(object)
    }

    fn validate_psu_data_update(
        validation: &AisValidationService,
        object: &UpdateConsentPsuDataObject<Self>,
    ) -> ValidationResult {
        validation.validate_consent_psu_data_on_update(object)
    }
}

impl StoredConsent for PiisConsent {
    type Validation = PiisValidationService;

    fn fetch(cms: &dyn ConsentCms, consent_id: &ConsentId) -> Option<Self> {
        cms.get_piis_consent_by_id(consent_id)
    }

    fn validate_sca_status_read(
        validation: &PiisValidationService,
        object: &GetConsentAuthorisationScaStatusObject<Self>,
    ) -> ValidationResult {
        validation.validate_consent_authorisation_sca_status(object)
    }

    fn validate_psu_data_update(
        validation: &PiisValidationService,
        object: &UpdateConsentPsuDataObject<Self>,
    ) -> ValidationResult {
        validation.validate_consent_psu_data_on_update(object)
    }
}

/// Authorisation status service for AIS or PIIS consents.
pub struct ConsentAuthorisationStatusService<C: StoredConsent> {
    consent_cms: Arc<dyn ConsentCms>,
    steps: AuthorisationSteps,
    validation: Arc<C::Validation>,
    today: Clock,
}

pub type AisAuthorisationStatusService = ConsentAuthorisationStatusService<AisConsent>;
pub type PiisAuthorisationStatusService = ConsentAuthorisationStatusService<PiisConsent>;

impl<C: StoredConsent> ConsentAuthorisationStatusService<C> {
    pub fn new(
        consent_cms: Arc<dyn ConsentCms>,
        authorisation_cms: Arc<dyn AuthorisationCms>,
        accessibility: Arc<EndpointAccessibilityChecker>,
        validation: Arc<C::Validation>,
    ) -> Self {
        Self {
            consent_cms,
            steps: AuthorisationSteps {
                authorisation_cms,
                accessibility,
                stage_check: AuthorisationStageCheckValidator::new(),
            },
            validation,
            today: utc_today,
        }
    }

    /// Replace the date source used for the expiry check.
    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }

    fn consent(&self, consent_id: &ConsentId) -> Result<C, MessageError> {
        let service = C::SERVICE_TYPE;
        C::fetch(self.consent_cms.as_ref(), consent_id).ok_or_else(|| {
            tracing::info!(consent_id = %consent_id, service = %service, "consent not found");
            MessageError::of(service, MessageErrorCode::ConsentUnknown403)
        })
    }

    /// Decide whether a PSU-data update may be processed and return the
    /// authorisation it applies to.
    pub fn check_psu_data_update(
        &self,
        request: &ConsentPsuDataUpdate,
    ) -> ResponseObject<Authorisation> {
        self.run_psu_data_update(request).into()
    }

    fn run_psu_data_update(
        &self,
        request: &ConsentPsuDataUpdate,
    ) -> Result<Authorisation, MessageError> {
        let service = C::SERVICE_TYPE;
        let consent = self.consent(&request.consent_id)?;
        self.steps.check_accessible(&request.update, service)?;

        let object = UpdateConsentPsuDataObject {
            consent,
            tpp_info: request.tpp_info.clone(),
            update: request.update.clone(),
        };
        if let Err(error) = C::validate_psu_data_update(&self.validation, &object).into_result() {
            self.steps.fail_on_psu_error(&error, &request.update, service);
            return Err(error);
        }
        // Expiry leaves the authorisation untouched.
        checks::check_consent_not_expired(&object.consent, (self.today)())?;
        self.steps
            .finish_update(&request.update, service, MessageErrorCode::ConsentUnknown403)
    }
}

impl<C: StoredConsent> AuthorisationStatusService for ConsentAuthorisationStatusService<C> {
    type Request = ConsentScaStatusRequest;
    type Resource = C;

    fn authorisation_type(&self) -> AuthorisationType {
        C::AUTHORISATION_TYPE
    }

    fn get_authorisation_sca_status(
        &self,
        request: &ConsentScaStatusRequest,
    ) -> ResponseObject<ScaStatusEnvelope<C>> {
        let consent = match self.consent(&request.consent_id) {
            Ok(consent) => consent,
            Err(error) => return ResponseObject::failure(error),
        };
        let object = GetConsentAuthorisationScaStatusObject {
            consent,
            tpp_info: request.tpp_info.clone(),
            authorisation_id: request.authorisation_id.clone(),
        };
        if let Err(error) = C::validate_sca_status_read(&self.validation, &object).into_result() {
            return ResponseObject::failure(error);
        }
        self.steps
            .envelope(object.consent, &request.authorisation_id, C::SERVICE_TYPE)
    }
}

// ─── Payments ────────────────────────────────────────────────────────

/// Authorisation status service for payment initiation or cancellation.
pub struct PaymentAuthorisationStatusService {
    payment_cms: Arc<dyn PaymentCms>,
    authorisation_type: AuthorisationType,
    steps: AuthorisationSteps,
    validation: Arc<PisValidationService>,
}

impl PaymentAuthorisationStatusService {
    /// Service for payment initiation authorisations.
    pub fn initiation(
        payment_cms: Arc<dyn PaymentCms>,
        authorisation_cms: Arc<dyn AuthorisationCms>,
        accessibility: Arc<EndpointAccessibilityChecker>,
        validation: Arc<PisValidationService>,
    ) -> Self {
        Self::of_type(
            AuthorisationType::Pis,
            payment_cms,
            authorisation_cms,
            accessibility,
            validation,
        )
    }

    /// Service for payment cancellation authorisations.
    pub fn cancellation(
        payment_cms: Arc<dyn PaymentCms>,
        authorisation_cms: Arc<dyn AuthorisationCms>,
        accessibility: Arc<EndpointAccessibilityChecker>,
        validation: Arc<PisValidationService>,
    ) -> Self {
        Self::of_type(
            AuthorisationType::PisCancellation,
            payment_cms,
            authorisation_cms,
            accessibility,
            validation,
        )
    }

    fn of_type(
        authorisation_type: AuthorisationType,
        payment_cms: Arc<dyn PaymentCms>,
        authorisation_cms: Arc<dyn AuthorisationCms>,
        accessibility: Arc<EndpointAccessibilityChecker>,
        validation: Arc<PisValidationService>,
    ) -> Self {
        Self {
            payment_cms,
            authorisation_type,
            steps: AuthorisationSteps {
                authorisation_cms,
                accessibility,
                stage_check: AuthorisationStageCheckValidator::new(),
            },
            validation,
        }
    }

    fn is_cancellation(&self) -> bool {
        self.authorisation_type == AuthorisationType::PisCancellation
    }

    fn validate_sca_status_read(&self, object: &GetPaymentScaStatusObject) -> ValidationResult {
        if self.is_cancellation() {
            self.validation.validate_cancellation_sca_status(object)
        } else {
            self.validation.validate_authorisation_sca_status(object)
        }
    }

    fn validate_psu_data_update(&self, object: &UpdatePisPsuDataObject) -> ValidationResult {
        if self.is_cancellation() {
            self.validation
                .validate_cancellation_psu_data_on_update(object)
        } else {
            self.validation.validate_psu_data_on_update(object)
        }
    }

    fn payment(&self, payment_id: &PaymentId) -> Result<CommonPayment, MessageError> {
        self.payment_cms.get_payment_by_id(payment_id).ok_or_else(|| {
            tracing::info!(payment_id = %payment_id, "payment not found");
            MessageError::of(ServiceType::Pis, MessageErrorCode::ResourceUnknown404)
        })
    }

    /// Decide whether a PSU-data update may be processed and return the
    /// authorisation it applies to.
    pub fn check_psu_data_update(
        &self,
        request: &PaymentPsuDataUpdate,
    ) -> ResponseObject<Authorisation> {
        self.run_psu_data_update(request).into()
    }

    fn run_psu_data_update(
        &self,
        request: &PaymentPsuDataUpdate,
    ) -> Result<Authorisation, MessageError> {
        let payment = self.payment(&request.payment_id)?;
        self.steps.check_accessible(&request.update, ServiceType::Pis)?;

        let object = UpdatePisPsuDataObject {
            payment,
            tpp_info: request.tpp_info.clone(),
            path: request.path.clone(),
            update: request.update.clone(),
        };
        if let Err(error) = self.validate_psu_data_update(&object).into_result() {
            self.steps
                .fail_on_psu_error(&error, &request.update, ServiceType::Pis);
            return Err(error);
        }
        self.steps.finish_update(
            &request.update,
            ServiceType::Pis,
            MessageErrorCode::ResourceUnknown403,
        )
    }
}

impl AuthorisationStatusService for PaymentAuthorisationStatusService {
    type Request = PaymentScaStatusRequest;
    type Resource = CommonPayment;

    fn authorisation_type(&self) -> AuthorisationType {
        self.authorisation_type
    }

    fn get_authorisation_sca_status(
        &self,
        request: &PaymentScaStatusRequest,
    ) -> ResponseObject<ScaStatusEnvelope<CommonPayment>> {
        let payment = match self.payment(&request.payment_id) {
            Ok(payment) => payment,
            Err(error) => return ResponseObject::failure(error),
        };
        let object = GetPaymentScaStatusObject {
            payment,
            tpp_info: request.tpp_info.clone(),
            path: request.path.clone(),
            authorisation_id: request.authorisation_id.clone(),
        };
        if let Err(error) = self.validate_sca_status_read(&object).into_result() {
            return ResponseObject::failure(error);
        }
        self.steps
            .envelope(object.payment, &request.authorisation_id, ServiceType::Pis)
    }
}
