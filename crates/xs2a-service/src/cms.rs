//! # CMS Collaborator Contracts
//!
//! The Consent Management System is the system of record for consents,
//! payments and authorisations. The engine reads snapshots from it and
//! asks it to persist status changes; it never stores anything itself.
//!
//! ## Architecture
//!
//! Each concern is an object-safe `Send + Sync` trait so deployments plug
//! in their CMS client and tests plug in hand-written mocks. Calls are
//! synchronous and fail fast: no retries happen at this layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xs2a_core::{
    AisConsent, Authorisation, AuthorisationId, CommonPayment, ConsentId, PaymentId,
    PiisConsent, ScaStatus,
};
use xs2a_validation::{CreateConsentRequestObject, CreatePiisConsentRequestObject};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from CMS operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CmsError {
    /// The addressed record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of record looked up.
        resource: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The stored checksum of a consent no longer matches; the write was
    /// refused.
    #[error("checksum verification failed: {reason}")]
    Checksum {
        /// Description reported by the CMS.
        reason: String,
    },

    /// The CMS is unreachable or failed internally.
    #[error("CMS technical error: {reason}")]
    Technical {
        /// Description of the failure.
        reason: String,
    },

    /// The CMS refused the request on business grounds.
    #[error("CMS logical error: {reason}")]
    Logical {
        /// Description of the refusal.
        reason: String,
    },
}

// ─── Response Envelope ───────────────────────────────────────────────

/// Kind of error carried by a [`CmsResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CmsResponseError {
    TechnicalError,
    LogicalError,
    ChecksumError,
}

impl std::fmt::Display for CmsResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TechnicalError => "TECHNICAL_ERROR",
            Self::LogicalError => "LOGICAL_ERROR",
            Self::ChecksumError => "CHECKSUM_ERROR",
        };
        f.write_str(s)
    }
}

/// Payload or error returned by a CMS write.
///
/// A response may also come back with neither: the CMS accepted the call
/// but produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsResponse<T> {
    payload: Option<T>,
    error: Option<CmsResponseError>,
}

impl<T> CmsResponse<T> {
    pub fn with_payload(payload: T) -> Self {
        Self {
            payload: Some(payload),
            error: None,
        }
    }

    pub fn with_error(error: CmsResponseError) -> Self {
        Self {
            payload: None,
            error: Some(error),
        }
    }

    /// Neither payload nor error.
    pub fn empty() -> Self {
        Self {
            payload: None,
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_successful(&self) -> bool {
        self.error.is_none() && self.payload.is_some()
    }

    pub fn error(&self) -> Option<CmsResponseError> {
        self.error
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

/// Result of a successful consent creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedConsent<C = AisConsent> {
    pub consent_id: ConsentId,
    /// Snapshot as stored, enriched by the CMS.
    pub consent: C,
}

// ─── Contracts ───────────────────────────────────────────────────────

/// Authorisation records.
pub trait AuthorisationCms: Send + Sync {
    /// Fetch an authorisation by id. A missing record is
    /// [`CmsError::NotFound`].
    fn get_authorisation_by_id(
        &self,
        authorisation_id: &AuthorisationId,
    ) -> Result<Authorisation, CmsError>;

    /// Persist a new SCA status for an authorisation.
    fn update_authorisation_status(
        &self,
        authorisation_id: &AuthorisationId,
        status: ScaStatus,
    ) -> Result<(), CmsError>;
}

/// Consent snapshots.
pub trait ConsentCms: Send + Sync {
    fn get_ais_consent_by_id(&self, consent_id: &ConsentId) -> Option<AisConsent>;

    fn get_piis_consent_by_id(&self, consent_id: &ConsentId) -> Option<PiisConsent>;
}

/// Payment snapshots.
pub trait PaymentCms: Send + Sync {
    fn get_payment_by_id(&self, payment_id: &PaymentId) -> Option<CommonPayment>;
}

/// Consent creation.
pub trait ConsentCreationCms: Send + Sync {
    /// Store a new AIS consent. A checksum conflict is reported as
    /// [`CmsError::Checksum`].
    fn create_consent(
        &self,
        request: &CreateConsentRequestObject,
    ) -> Result<CmsResponse<CreatedConsent>, CmsError>;

    /// Store a new PIIS consent, with the same error conventions.
    fn create_piis_consent(
        &self,
        request: &CreatePiisConsentRequestObject,
    ) -> Result<CmsResponse<CreatedConsent<PiisConsent>>, CmsError>;
}
