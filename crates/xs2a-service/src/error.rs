//! # Service Errors
//!
//! Failures the service layer can meet while orchestrating an SCA
//! operation. Exposed operations never return these directly: each is
//! folded into a service-tagged [`MessageError`] inside a
//! `ResponseObject`.

use thiserror::Error;
use xs2a_core::{ErrorHolder, MessageError, MessageErrorCode, ServiceType};
use xs2a_state::ScaTransitionError;

use crate::cms::CmsError;
use crate::profile::ProfileError;

/// Errors raised inside the service layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A business validator rejected the request.
    #[error("validation failed: {0}")]
    ValidationFailure(MessageError),

    /// The ASPSP profile could not be obtained.
    #[error("ASPSP profile unavailable: {reason}")]
    ConfigurationFetchFailure {
        /// What went wrong while fetching the profile.
        reason: String,
    },

    /// The bank adapter reported an error, already mapped at the boundary.
    #[error("bank adapter error: {}", .0.error_type)]
    Adapter(ErrorHolder),

    /// The CMS rejected a write because the stored checksum changed.
    #[error("checksum conflict: {reason}")]
    ChecksumConflict {
        /// Description reported by the CMS.
        reason: String,
    },

    /// A resource or authorisation does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of record looked up.
        resource: &'static str,
        /// Identifier that was not found.
        id: String,
    },

    /// A collaborator failed for technical reasons.
    #[error("technical error: {reason}")]
    Technical {
        /// Description of the failure.
        reason: String,
    },

    /// The bank adapter reported a status with no local counterpart.
    #[error("unmapped adapter SCA status: {status}")]
    UnmappedStatus {
        /// The status as reported by the adapter.
        status: String,
    },

    /// The ASPSP profile was found but could not be parsed or validated.
    #[error("invalid ASPSP profile: {0}")]
    Profile(ProfileError),

    /// A requested status change violates the SCA state machine.
    #[error(transparent)]
    Transition(#[from] ScaTransitionError),
}

impl ServiceError {
    /// The TPP-facing error for this failure, tagged with `service_type`.
    pub fn to_message_error(&self, service_type: ServiceType) -> MessageError {
        match self {
            Self::ValidationFailure(error) => error.clone(),
            Self::Adapter(holder) => holder.clone().into(),
            Self::NotFound { .. } => {
                MessageError::of(service_type, MessageErrorCode::ResourceUnknown404)
            }
            Self::ConfigurationFetchFailure { .. }
            | Self::ChecksumConflict { .. }
            | Self::Technical { .. }
            | Self::UnmappedStatus { .. }
            | Self::Profile(_)
            | Self::Transition(_) => {
                MessageError::of(service_type, MessageErrorCode::InternalServerError)
            }
        }
    }
}

impl From<CmsError> for ServiceError {
    fn from(error: CmsError) -> Self {
        match error {
            CmsError::NotFound { resource, id } => Self::NotFound { resource, id },
            CmsError::Checksum { reason } => Self::ChecksumConflict { reason },
            CmsError::Technical { reason } | CmsError::Logical { reason } => {
                Self::Technical { reason }
            }
        }
    }
}

impl From<ProfileError> for ServiceError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::Io { .. } => Self::ConfigurationFetchFailure {
                reason: error.to_string(),
            },
            other => Self::Profile(other),
        }
    }
}
