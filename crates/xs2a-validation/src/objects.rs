//! # Validation Objects
//!
//! Typed bundles of resource snapshot + operation parameters handed to
//! validators. One object type per operation shape; consent objects are
//! generic over AIS and PIIS consents through [`ConsentResource`].

use chrono::NaiveDate;

use xs2a_core::{
    AccountAccess, AisConsent, AuthorisationId, AuthorisationParent, AuthorisationType,
    CommonPayment, ConsentStatus, PaymentType, PiisConsent, PsuIdData, ScaApproach, ScaStatus,
    ServiceType, TppInfo, TppNotificationData,
};

// ─── Consent Resources ───────────────────────────────────────────────

/// A consent snapshot the shared consent validators can work with.
pub trait ConsentResource: AuthorisationParent + Send + Sync {
    /// Service domain used to tag errors.
    const SERVICE_TYPE: ServiceType;
    /// Authorisation type of the consent's authorisations.
    const AUTHORISATION_TYPE: AuthorisationType;

    fn consent_status(&self) -> ConsentStatus;

    fn is_expired(&self, today: NaiveDate) -> bool;
}

impl ConsentResource for AisConsent {
    const SERVICE_TYPE: ServiceType = ServiceType::Ais;
    const AUTHORISATION_TYPE: AuthorisationType = AuthorisationType::Ais;

    fn consent_status(&self) -> ConsentStatus {
        self.consent_status
    }

    fn is_expired(&self, today: NaiveDate) -> bool {
        AisConsent::is_expired(self, today)
    }
}

impl ConsentResource for PiisConsent {
    const SERVICE_TYPE: ServiceType = ServiceType::Piis;
    const AUTHORISATION_TYPE: AuthorisationType = AuthorisationType::Piis;

    fn consent_status(&self) -> ConsentStatus {
        self.consent_status
    }

    fn is_expired(&self, today: NaiveDate) -> bool {
        PiisConsent::is_expired(self, today)
    }
}

// ─── Authorisation Update ────────────────────────────────────────────

/// Data sent by the TPP to advance an embedded or decoupled authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAuthorisationRequest {
    pub authorisation_id: AuthorisationId,
    pub psu_data: PsuIdData,
    pub password: Option<String>,
    pub authentication_method_id: Option<String>,
    pub sca_authentication_data: Option<String>,
    /// Authorisation confirmation code returned by a redirect.
    pub confirmation_code: Option<String>,
}

impl UpdateAuthorisationRequest {
    pub fn new(authorisation_id: AuthorisationId, psu_data: PsuIdData) -> Self {
        Self {
            authorisation_id,
            psu_data,
            password: None,
            authentication_method_id: None,
            sca_authentication_data: None,
            confirmation_code: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_authentication_method_id(mut self, id: impl Into<String>) -> Self {
        self.authentication_method_id = Some(id.into());
        self
    }

    pub fn with_sca_authentication_data(mut self, data: impl Into<String>) -> Self {
        self.sca_authentication_data = Some(data.into());
        self
    }

    pub fn with_confirmation_code(mut self, code: impl Into<String>) -> Self {
        self.confirmation_code = Some(code.into());
        self
    }
}

// ─── AIS / PIIS Consent Objects ──────────────────────────────────────

/// Body of an AIS consent creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConsentRequest {
    pub access: AccountAccess,
    pub recurring_indicator: bool,
    pub frequency_per_day: u32,
    pub valid_until: NaiveDate,
    pub combined_service_indicator: bool,
}

/// AIS consent creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConsentRequestObject {
    pub request: CreateConsentRequest,
    pub psu_id_data: PsuIdData,
    pub tpp_info: TppInfo,
    pub sca_approach: ScaApproach,
    pub tpp_notification_data: Option<TppNotificationData>,
}

/// Body of a PIIS consent creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePiisConsentRequest {
    pub account: String,
    pub card_number: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

/// PIIS consent creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePiisConsentRequestObject {
    pub request: CreatePiisConsentRequest,
    pub psu_id_data: PsuIdData,
    pub tpp_info: TppInfo,
}

/// Consent plus the requesting TPP (read by id, read status, delete, list
/// authorisations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonConsentObject<C> {
    pub consent: C,
    pub tpp_info: TppInfo,
}

/// Start of a new consent authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConsentAuthorisationObject<C> {
    pub consent: C,
    pub tpp_info: TppInfo,
    pub psu_id_data: PsuIdData,
}

/// Read of a consent authorisation's SCA status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetConsentAuthorisationScaStatusObject<C> {
    pub consent: C,
    pub tpp_info: TppInfo,
    pub authorisation_id: AuthorisationId,
}

/// PSU data update on a consent authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConsentPsuDataObject<C> {
    pub consent: C,
    pub tpp_info: TppInfo,
    pub update: UpdateAuthorisationRequest,
}

// ─── PIS Objects ─────────────────────────────────────────────────────

/// Payment service and product from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequestPath {
    pub payment_type: PaymentType,
    pub payment_product: String,
}

impl PaymentRequestPath {
    pub fn new(payment_type: PaymentType, payment_product: impl Into<String>) -> Self {
        Self {
            payment_type,
            payment_product: payment_product.into(),
        }
    }
}

/// Payment initiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentRequestObject {
    pub path: PaymentRequestPath,
    pub psu_id_data: PsuIdData,
    pub tpp_info: TppInfo,
}

/// Payment plus the requesting TPP and path (read, read status, cancel,
/// list authorisations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonPaymentObject {
    pub payment: CommonPayment,
    pub tpp_info: TppInfo,
    pub path: PaymentRequestPath,
}

/// Start of a new payment (initiation or cancellation) authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePisAuthorisationObject {
    pub payment: CommonPayment,
    pub tpp_info: TppInfo,
    pub path: PaymentRequestPath,
    pub psu_id_data: PsuIdData,
}

/// Read of a payment authorisation's SCA status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPaymentScaStatusObject {
    pub payment: CommonPayment,
    pub tpp_info: TppInfo,
    pub path: PaymentRequestPath,
    pub authorisation_id: AuthorisationId,
}

/// PSU data update on a payment authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePisPsuDataObject {
    pub payment: CommonPayment,
    pub tpp_info: TppInfo,
    pub path: PaymentRequestPath,
    pub update: UpdateAuthorisationRequest,
}

// ─── Stage Check ─────────────────────────────────────────────────────

/// An update request against the current step of an authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorisationStageObject {
    pub update: UpdateAuthorisationRequest,
    pub sca_status: ScaStatus,
    pub authorisation_type: AuthorisationType,
}
