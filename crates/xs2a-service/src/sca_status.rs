//! # SCA Status Resolver
//!
//! Answers "what is the SCA status of authorisation X" by merging the
//! status the CMS knows with the status the bank adapter reports.
//!
//! ## Flow
//!
//! ```text
//! status service ──▶ envelope ──rejected──▶ validation failure
//!                        │
//!                    terminal? ──▶ return known status
//!                                  │
//!                                  ▼
//!                  adapter get_sca_status ──error──▶ mapped failure
//!                                  │
//!                          translate status ──unknown──▶ INTERNAL_SERVER_ERROR
//!                                  │
//!                  moved to FINALISED? ──▶ finalise ──▶ update_authorisation_status
//!                                  │
//!            cancellation + trusted beneficiaries ──▶ request flag
//! ```
//!
//! The CMS is the source of truth for authorisations that already ended;
//! the adapter for everything in flight. Local state only ever advances
//! to FINALISED here, through the guard in `xs2a-state`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use xs2a_core::{
    AspspProfileService, AuthenticationObject, AuthorisationParent, AuthorisationType,
    ResponseObject, ScaStatus, ServiceType, TppMessage,
};
use xs2a_state::{resolve_reported_status, AuthorisationLifecycle};

use crate::authorisation::{AuthorisationStatusService, ScaStatusEnvelope, ScaStatusQuery};
use crate::cms::AuthorisationCms;
use crate::error::ServiceError;
use crate::spi::{
    AspspConsentDataProviderFactory, ScaStatusSpi, SpiContextData, SpiErrorMapper, SpiResponse,
};

/// Authoritative status of an authorisation, returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaStatusResponse {
    pub sca_status: ScaStatus,
    /// Whether SCA completed successfully.
    pub finalised: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psu_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method: Option<AuthenticationObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_beneficiary_flag: Option<bool>,
}

impl ScaStatusResponse {
    /// Response carrying only a status.
    pub fn of(sca_status: ScaStatus) -> Self {
        Self {
            sca_status,
            finalised: sca_status.is_finalised(),
            psu_message: None,
            authentication_method: None,
            trusted_beneficiary_flag: None,
        }
    }
}

/// Resolves SCA statuses for the authorisations of one status service.
pub struct ScaStatusResolver<S: AuthorisationStatusService> {
    status_service: Arc<S>,
    spi: Arc<dyn ScaStatusSpi<S::Resource>>,
    authorisation_cms: Arc<dyn AuthorisationCms>,
    data_providers: Arc<dyn AspspConsentDataProviderFactory>,
    profile: Arc<dyn AspspProfileService>,
}

impl<S: AuthorisationStatusService> ScaStatusResolver<S> {
    pub fn new(
        status_service: Arc<S>,
        spi: Arc<dyn ScaStatusSpi<S::Resource>>,
        authorisation_cms: Arc<dyn AuthorisationCms>,
        data_providers: Arc<dyn AspspConsentDataProviderFactory>,
        profile: Arc<dyn AspspProfileService>,
    ) -> Self {
        Self {
            status_service,
            spi,
            authorisation_cms,
            data_providers,
            profile,
        }
    }

    /// Current SCA status of the authorisation addressed by `request`.
    pub fn get_sca_status(&self, request: &S::Request) -> ResponseObject<ScaStatusResponse> {
        let service_type = self.status_service.service_type();
        self.resolve(request)
            .map_err(|e| {
                if let ServiceError::ValidationFailure(_) = e {
                    tracing::debug!(
                        authorisation_id = %request.authorisation_id(),
                        service = %service_type,
                        error = %e,
                        "SCA status read rejected"
                    );
                } else {
                    tracing::warn!(
                        authorisation_id = %request.authorisation_id(),
                        service = %service_type,
                        error = %e,
                        "SCA status could not be resolved"
                    );
                }
                e.to_message_error(service_type)
            })
            .into()
    }

    fn resolve(&self, request: &S::Request) -> Result<ScaStatusResponse, ServiceError> {
        let envelope = self
            .status_service
            .get_authorisation_sca_status(request)
            .into_result()
            .map_err(ServiceError::ValidationFailure)?;
        if envelope.sca_status.is_terminal() {
            return Ok(ScaStatusResponse::of(envelope.sca_status));
        }
        self.resolve_with_adapter(request, envelope)
    }

    fn resolve_with_adapter(
        &self,
        request: &S::Request,
        envelope: ScaStatusEnvelope<S::Resource>,
    ) -> Result<ScaStatusResponse, ServiceError> {
        let service_type = self.status_service.service_type();
        let authorisation_id = request.authorisation_id();
        let context = SpiContextData::new(envelope.psu_id_data.clone(), request.tpp_info().clone());
        let provider = self
            .data_providers
            .provider_for(envelope.business_object.resource_id());

        let reported = match self.spi.get_sca_status(
            envelope.sca_status,
            &context,
            authorisation_id,
            &envelope.business_object,
            provider.as_ref(),
        ) {
            SpiResponse::Success(reported) => reported,
            SpiResponse::Failure(errors) => {
                return Err(adapter_error(&errors, service_type));
            }
        };

        let status = reported
            .sca_status
            .to_sca_status()
            .ok_or_else(|| ServiceError::UnmappedStatus {
                status: reported.sca_status.to_string(),
            })?;

        let decision = resolve_reported_status(envelope.sca_status, status)?;
        if decision.persist {
            let mut lifecycle = AuthorisationLifecycle::new(envelope.authorisation.clone());
            lifecycle.finalise("bank adapter reported FINALISED")?;
            self.authorisation_cms
                .update_authorisation_status(authorisation_id, lifecycle.status())?;
            tracing::info!(
                authorisation_id = %authorisation_id,
                service = %service_type,
                from = %envelope.sca_status,
                to = %lifecycle.status(),
                psu = ?xs2a_core::clear(Some(&envelope.psu_id_data)),
                "authorisation status persisted"
            );
        }

        let trusted_beneficiary_flag = if self.status_service.authorisation_type()
            == AuthorisationType::PisCancellation
            && self.profile.is_trusted_beneficiaries_supported()
        {
            match self.spi.request_trusted_beneficiary_flag(
                &context,
                authorisation_id,
                &envelope.business_object,
                provider.as_ref(),
            ) {
                SpiResponse::Success(flag) => Some(flag),
                SpiResponse::Failure(errors) => {
                    return Err(adapter_error(&errors, service_type));
                }
            }
        } else {
            None
        };

        Ok(ScaStatusResponse {
            sca_status: decision.resolved,
            finalised: decision.resolved.is_finalised(),
            psu_message: reported.psu_message,
            authentication_method: reported.authentication_method,
            trusted_beneficiary_flag,
        })
    }
}

fn adapter_error(errors: &[TppMessage], service_type: ServiceType) -> ServiceError {
    ServiceError::Adapter(SpiErrorMapper::map_to_error_holder(errors, service_type))
}
