//! # Consent Creation Response Service
//!
//! Folds the CMS answer to a create-consent call into a
//! [`ResponseObject`]. Callers see one failure shape per domain,
//! `AIS_400 RESOURCE_UNKNOWN` or `PIIS_400 RESOURCE_UNKNOWN`, whether the
//! CMS failed technically, refused the request, hit a checksum conflict,
//! or returned nothing.

use std::sync::Arc;

use xs2a_core::{
    MessageError, MessageErrorCode, PiisConsent, PsuIdData, ResponseObject, ServiceType, TppInfo,
};
use xs2a_validation::{CreateConsentRequestObject, CreatePiisConsentRequestObject};

use crate::cms::{CmsError, CmsResponse, CmsResponseError, ConsentCreationCms, CreatedConsent};
use crate::error::ServiceError;

/// Creates AIS and PIIS consents through the CMS.
pub struct ConsentCreationResponseService {
    cms: Arc<dyn ConsentCreationCms>,
}

impl ConsentCreationResponseService {
    pub fn new(cms: Arc<dyn ConsentCreationCms>) -> Self {
        Self { cms }
    }

    /// Store the AIS consent described by `request`.
    pub fn create_consent(
        &self,
        request: &CreateConsentRequestObject,
    ) -> ResponseObject<CreatedConsent> {
        let answer = self.cms.create_consent(request);
        respond(
            ServiceType::Ais,
            &request.tpp_info,
            &request.psu_id_data,
            answer,
        )
    }

    /// Store the PIIS consent described by `request`.
    pub fn create_piis_consent(
        &self,
        request: &CreatePiisConsentRequestObject,
    ) -> ResponseObject<CreatedConsent<PiisConsent>> {
        let answer = self.cms.create_piis_consent(request);
        respond(
            ServiceType::Piis,
            &request.tpp_info,
            &request.psu_id_data,
            answer,
        )
    }
}

fn respond<C>(
    service_type: ServiceType,
    tpp_info: &TppInfo,
    psu_id_data: &PsuIdData,
    answer: Result<CmsResponse<CreatedConsent<C>>, CmsError>,
) -> ResponseObject<CreatedConsent<C>> {
    match fold(answer) {
        Ok(created) => {
            tracing::info!(
                consent_id = %created.consent_id,
                service = %service_type,
                "consent created"
            );
            ResponseObject::success(created)
        }
        Err(e) => {
            tracing::warn!(
                tpp = %tpp_info.authorisation_number,
                service = %service_type,
                psu = ?xs2a_core::clear(Some(psu_id_data)),
                error = %e,
                "consent creation failed"
            );
            ResponseObject::failure(MessageError::of(
                service_type,
                MessageErrorCode::ResourceUnknown400,
            ))
        }
    }
}

fn fold<T>(answer: Result<CmsResponse<T>, CmsError>) -> Result<T, ServiceError> {
    let response = answer?;
    match response.error() {
        Some(CmsResponseError::ChecksumError) => {
            return Err(ServiceError::ChecksumConflict {
                reason: "consent checksum changed".to_string(),
            });
        }
        Some(error) => {
            return Err(ServiceError::Technical {
                reason: format!("CMS answered {error}"),
            });
        }
        None => {}
    }
    response.into_payload().ok_or_else(|| ServiceError::Technical {
        reason: "CMS returned no consent".to_string(),
    })
}
