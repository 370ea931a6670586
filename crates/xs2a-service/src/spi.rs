//! # Bank Adapter (SPI) Contracts
//!
//! The SPI is the bank-specific integration layer. During an active
//! authorisation it is the source of truth for the current SCA status.
//!
//! ## Architecture
//!
//! [`ScaStatusSpi`] is generic over the business object it is asked about
//! (an AIS consent, a PIIS consent or a payment), so one adapter
//! implementation per domain plugs into the same resolver. Adapter errors
//! arrive as TPP messages and are mapped exactly once, by
//! [`SpiErrorMapper`], into a service-tagged [`ErrorHolder`].
//!
//! The adapter's status vocabulary is wider than the engine's:
//! [`SpiScaStatus`] keeps anything it cannot name so the resolver can
//! refuse it instead of guessing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xs2a_core::{
    AuthenticationObject, AuthorisationId, ErrorHolder, MessageErrorCode, PsuIdData, ScaStatus,
    ServiceType, TppInfo, TppMessage,
};

// ─── Adapter Status ──────────────────────────────────────────────────

/// SCA status as reported by the bank adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpiScaStatus {
    Received,
    PsuIdentified,
    PsuAuthenticated,
    ScaMethodSelected,
    Started,
    Finalised,
    Failed,
    Exempted,
    /// Waiting for the TPP to confirm with the authorisation code.
    Unconfirmed,
    /// Any value the adapter sent that has no name here.
    Other(String),
}

impl SpiScaStatus {
    /// Parse the adapter's wire spelling; unknown values are kept verbatim.
    pub fn from_wire(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "received" => Self::Received,
            "psuidentified" => Self::PsuIdentified,
            "psuauthenticated" => Self::PsuAuthenticated,
            "scamethodselected" => Self::ScaMethodSelected,
            "started" => Self::Started,
            "finalised" => Self::Finalised,
            "failed" => Self::Failed,
            "exempted" => Self::Exempted,
            "unconfirmed" => Self::Unconfirmed,
            _ => Self::Other(value.to_string()),
        }
    }

    /// The engine's status for this value, if it has one.
    pub fn to_sca_status(&self) -> Option<ScaStatus> {
        match self {
            Self::Received => Some(ScaStatus::Received),
            Self::PsuIdentified => Some(ScaStatus::PsuIdentified),
            Self::PsuAuthenticated => Some(ScaStatus::PsuAuthenticated),
            Self::ScaMethodSelected => Some(ScaStatus::ScaMethodSelected),
            Self::Started => Some(ScaStatus::Started),
            Self::Finalised => Some(ScaStatus::Finalised),
            Self::Failed => Some(ScaStatus::Failed),
            Self::Exempted => Some(ScaStatus::Exempted),
            Self::Unconfirmed | Self::Other(_) => None,
        }
    }
}

impl From<ScaStatus> for SpiScaStatus {
    fn from(status: ScaStatus) -> Self {
        match status {
            ScaStatus::Received => Self::Received,
            ScaStatus::PsuIdentified => Self::PsuIdentified,
            ScaStatus::PsuAuthenticated => Self::PsuAuthenticated,
            ScaStatus::ScaMethodSelected => Self::ScaMethodSelected,
            ScaStatus::Started => Self::Started,
            ScaStatus::Finalised => Self::Finalised,
            ScaStatus::Failed => Self::Failed,
            ScaStatus::Exempted => Self::Exempted,
        }
    }
}

impl std::fmt::Display for SpiScaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfirmed => f.write_str("UNCONFIRMED"),
            Self::Other(value) => f.write_str(value),
            known => match known.to_sca_status() {
                Some(status) => write!(f, "{status}"),
                None => Ok(()),
            },
        }
    }
}

/// Adapter answer to a status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiScaStatusResponse {
    pub sca_status: SpiScaStatus,
    /// Message to show to the PSU.
    pub psu_message: Option<String>,
    /// Method used or offered for the current step.
    pub authentication_method: Option<AuthenticationObject>,
}

impl SpiScaStatusResponse {
    /// Response carrying only a status.
    pub fn status(sca_status: SpiScaStatus) -> Self {
        Self {
            sca_status,
            psu_message: None,
            authentication_method: None,
        }
    }
}

// ─── Adapter Response ────────────────────────────────────────────────

/// Payload, or the errors the adapter reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiResponse<T> {
    Success(T),
    Failure(Vec<TppMessage>),
}

impl<T> SpiResponse<T> {
    pub fn has_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }
}

// ─── Context ─────────────────────────────────────────────────────────

/// Request context handed to every adapter call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiContextData {
    pub psu_data: PsuIdData,
    pub tpp_info: TppInfo,
    pub x_request_id: Uuid,
    pub internal_request_id: Uuid,
}

impl SpiContextData {
    /// Context with freshly generated request ids.
    pub fn new(psu_data: PsuIdData, tpp_info: TppInfo) -> Self {
        Self {
            psu_data,
            tpp_info,
            x_request_id: Uuid::new_v4(),
            internal_request_id: Uuid::new_v4(),
        }
    }
}

/// Opaque bank data stored alongside a consent or payment.
pub trait SpiAspspConsentDataProvider: Send + Sync {
    /// Id of the consent or payment the data belongs to.
    fn resource_id(&self) -> &str;

    /// Stored bytes; empty when nothing was stored yet.
    fn load_aspsp_consent_data(&self) -> Vec<u8>;

    fn update_aspsp_consent_data(&self, data: &[u8]);
}

/// Produces consent-data providers scoped to one resource.
pub trait AspspConsentDataProviderFactory: Send + Sync {
    fn provider_for(&self, resource_id: &str) -> Box<dyn SpiAspspConsentDataProvider>;
}

// ─── Adapter Contract ────────────────────────────────────────────────

/// Status operations of a bank adapter for business objects of type `B`.
pub trait ScaStatusSpi<B>: Send + Sync {
    /// Current status of an authorisation as the bank sees it.
    fn get_sca_status(
        &self,
        current: ScaStatus,
        context: &SpiContextData,
        authorisation_id: &AuthorisationId,
        business_object: &B,
        data_provider: &dyn SpiAspspConsentDataProvider,
    ) -> SpiResponse<SpiScaStatusResponse>;

    /// Whether the payee of `business_object` is a trusted beneficiary.
    fn request_trusted_beneficiary_flag(
        &self,
        context: &SpiContextData,
        authorisation_id: &AuthorisationId,
        business_object: &B,
        data_provider: &dyn SpiAspspConsentDataProvider,
    ) -> SpiResponse<bool>;
}

// ─── Error Mapping ───────────────────────────────────────────────────

/// Maps adapter errors into service-tagged error holders.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiErrorMapper;

impl SpiErrorMapper {
    /// The HTTP status comes from the first message; an adapter failure
    /// without messages is an internal server error.
    pub fn map_to_error_holder(errors: &[TppMessage], service_type: ServiceType) -> ErrorHolder {
        match errors.first() {
            Some(first) => ErrorHolder::new(
                service_type.error_type(first.code.http_status()),
                errors.to_vec(),
            ),
            None => ErrorHolder::new(
                service_type.error_type(MessageErrorCode::InternalServerError.http_status()),
                vec![TppMessage::error(MessageErrorCode::InternalServerError)],
            ),
        }
    }
}
