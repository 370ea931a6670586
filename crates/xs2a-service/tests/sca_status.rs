//! # SCA Status Resolution — Integration Tests
//!
//! Status reads through the authorisation status services and the
//! resolver, against an in-memory CMS and a scripted bank adapter:
//! - terminal statuses never reach the adapter
//! - only a move to FINALISED is persisted, exactly once
//! - adapter errors and unknown adapter statuses fail without side effects
//! - the trusted-beneficiary flag is only requested for cancellations

mod common;

use std::sync::Arc;

use common::*;
use xs2a_core::{
    AuthenticationObject, AuthorisationId, AuthorisationType, ConsentId, MessageErrorCode,
    PaymentId, PsuIdData, ScaApproach, ScaStatus,
};
use xs2a_service::{
    AisAuthorisationStatusService, AspspProfile, AuthorisationStatusService, ConsentScaStatusRequest,
    PaymentAuthorisationStatusService, PaymentScaStatusRequest, PiisAuthorisationStatusService,
    ScaStatusResolver, SpiResponse, SpiScaStatus, SpiScaStatusResponse,
};

fn ais_resolver(
    cms: &Arc<MockCms>,
    spi: Arc<MockSpi>,
    profile: AspspProfile,
) -> (ScaStatusResolver<AisAuthorisationStatusService>, Arc<MockDataProviders>) {
    let providers = MockDataProviders::new();
    let service = Arc::new(AisAuthorisationStatusService::new(
        cms.clone(),
        cms.clone(),
        accessibility(cms, profile.clone()),
        ais_validation(&profile),
    ));
    let resolver = ScaStatusResolver::new(
        service,
        spi,
        cms.clone(),
        providers.clone(),
        Arc::new(profile),
    );
    (resolver, providers)
}

fn payment_resolver(
    cms: &Arc<MockCms>,
    spi: Arc<MockSpi>,
    profile: AspspProfile,
    cancellation: bool,
) -> ScaStatusResolver<PaymentAuthorisationStatusService> {
    let checker = accessibility(cms, profile.clone());
    let validation = pis_validation(&profile);
    let service = if cancellation {
        PaymentAuthorisationStatusService::cancellation(cms.clone(), cms.clone(), checker, validation)
    } else {
        PaymentAuthorisationStatusService::initiation(cms.clone(), cms.clone(), checker, validation)
    };
    ScaStatusResolver::new(
        Arc::new(service),
        spi,
        cms.clone(),
        MockDataProviders::new(),
        Arc::new(profile),
    )
}

fn consent_request(consent: &str, authorisation: &str) -> ConsentScaStatusRequest {
    ConsentScaStatusRequest {
        consent_id: ConsentId::new(consent),
        authorisation_id: AuthorisationId::new(authorisation),
        tpp_info: tpp(),
    }
}

fn payment_request(authorisation: &str) -> PaymentScaStatusRequest {
    PaymentScaStatusRequest {
        payment_id: PaymentId::new("payment-1"),
        path: payment_path(),
        authorisation_id: AuthorisationId::new(authorisation),
        tpp_info: tpp(),
    }
}

fn reports(status: SpiScaStatus) -> SpiResponse<SpiScaStatusResponse> {
    SpiResponse::Success(SpiScaStatusResponse::status(status))
}

fn seed_ais(cms: &MockCms, status: ScaStatus) {
    cms.put_ais(
        ais_consent("consent-1"),
        &[authorisation(
            "auth-1",
            "consent-1",
            AuthorisationType::Ais,
            ScaApproach::Embedded,
            status,
        )],
    );
}

// ─── Terminal statuses ───────────────────────────────────────────────

#[test]
fn terminal_status_skips_the_adapter() {
    for status in [ScaStatus::Finalised, ScaStatus::Failed, ScaStatus::Exempted] {
        let cms = MockCms::new();
        seed_ais(&cms, status);
        let spi = MockSpi::answering(reports(SpiScaStatus::Received));
        let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

        let response = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));

        let body = response.body().expect("status");
        assert_eq!(body.sca_status, status);
        assert_eq!(body.finalised, status == ScaStatus::Finalised);
        assert_eq!(spi.status_calls(), 0);
        assert!(cms.updates().is_empty());
    }
}

#[test]
fn envelope_carries_the_cms_record() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::PsuAuthenticated);
    let service = AisAuthorisationStatusService::new(
        cms.clone(),
        cms.clone(),
        accessibility(&cms, profile()),
        ais_validation(&profile()),
    );

    let envelope = service
        .get_authorisation_sca_status(&consent_request("consent-1", "auth-1"))
        .into_result()
        .unwrap();
    assert_eq!(envelope.authorisation.authorisation_id, AuthorisationId::new("auth-1"));
    assert_eq!(envelope.authorisation.sca_status, ScaStatus::PsuAuthenticated);
    assert_eq!(envelope.sca_status, ScaStatus::PsuAuthenticated);
}

// ─── Adapter as source of truth ──────────────────────────────────────

#[test]
fn adapter_finalised_is_persisted_exactly_once() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::Received);
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let (resolver, providers) = ais_resolver(&cms, spi.clone(), profile());

    let response = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));

    assert!(response.is_successful());
    let body = response.body().unwrap();
    assert_eq!(body.sca_status, ScaStatus::Finalised);
    assert!(body.finalised);
    assert_eq!(
        cms.updates(),
        vec![(AuthorisationId::new("auth-1"), ScaStatus::Finalised)]
    );
    assert_eq!(spi.status_calls(), 1);
    assert_eq!(providers.requested(), vec!["consent-1".to_string()]);

    // The record is now terminal: a second read answers from the CMS.
    let again = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));
    assert_eq!(again.body().unwrap().sca_status, ScaStatus::Finalised);
    assert_eq!(spi.status_calls(), 1);
    assert_eq!(cms.updates().len(), 1);
}

#[test]
fn non_finalised_adapter_status_is_reported_not_persisted() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::Received);
    let spi = MockSpi::answering(reports(SpiScaStatus::Started));
    let (resolver, _) = ais_resolver(&cms, spi, profile());

    let response = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));

    let body = response.body().unwrap();
    assert_eq!(body.sca_status, ScaStatus::Started);
    assert!(!body.finalised);
    assert!(cms.updates().is_empty());
    assert_eq!(cms.status_of("auth-1"), Some(ScaStatus::Received));
}

#[test]
fn adapter_metadata_passes_through() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::ScaMethodSelected);
    let method = AuthenticationObject {
        authentication_type: "SMS_OTP".to_string(),
        authentication_method_id: "sms-1".to_string(),
        ..AuthenticationObject::default()
    };
    let spi = MockSpi::answering(SpiResponse::Success(SpiScaStatusResponse {
        sca_status: SpiScaStatus::Started,
        psu_message: Some("Check your phone".to_string()),
        authentication_method: Some(method.clone()),
    }));
    let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

    let body = resolver
        .get_sca_status(&consent_request("consent-1", "auth-1"))
        .into_result()
        .unwrap();
    assert_eq!(body.psu_message.as_deref(), Some("Check your phone"));
    assert_eq!(body.authentication_method, Some(method));
    assert_eq!(body.trusted_beneficiary_flag, None);
    assert_eq!(spi.flag_calls(), 0);
}

#[test]
fn adapter_context_carries_the_authorisation_psu() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::Received);
    let spi = MockSpi::answering(reports(SpiScaStatus::Received));
    let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

    resolver.get_sca_status(&consent_request("consent-1", "auth-1"));
    assert_eq!(spi.last_psu(), Some(psu()));
}

// ─── Failures ────────────────────────────────────────────────────────

#[test]
fn adapter_error_is_mapped_without_side_effects() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::PsuAuthenticated);
    let spi = MockSpi::answering(spi_failure(MessageErrorCode::PsuCredentialsInvalid));
    let (resolver, _) = ais_resolver(&cms, spi, profile());

    let response = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));

    assert!(response.has_error());
    let error = response.error().unwrap();
    assert_eq!(error.error_type.to_string(), "AIS_401");
    assert!(error.contains(MessageErrorCode::PsuCredentialsInvalid));
    assert!(cms.updates().is_empty());
}

#[test]
fn unknown_adapter_status_is_an_internal_error() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::Started);
    let spi = MockSpi::answering(reports(SpiScaStatus::Unconfirmed));
    let (resolver, _) = ais_resolver(&cms, spi, profile());

    let response = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));

    assert!(response.has_error());
    let error = response.error().unwrap();
    assert_eq!(error.error_type.to_string(), "AIS_500");
    assert!(error.contains(MessageErrorCode::InternalServerError));
    assert!(cms.updates().is_empty());
}

#[test]
fn missing_consent_fails_before_the_adapter() {
    let cms = MockCms::new();
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

    let response = resolver.get_sca_status(&consent_request("nope", "auth-1"));

    let error = response.error().unwrap();
    assert_eq!(error.error_type.to_string(), "AIS_403");
    assert!(error.contains(MessageErrorCode::ConsentUnknown403));
    assert_eq!(spi.status_calls(), 0);
}

#[test]
fn foreign_authorisation_is_rejected_by_validation() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::Received);
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

    let response = resolver.get_sca_status(&consent_request("consent-1", "someone-elses"));

    // The validator's error reaches the TPP as is.
    let error = response.error().unwrap();
    assert_eq!(error.error_type.to_string(), "AIS_403");
    assert!(error.contains(MessageErrorCode::ResourceUnknown403));
    assert_eq!(spi.status_calls(), 0);
    assert!(cms.updates().is_empty());
}

#[test]
fn missing_authorisation_record_is_resource_unknown() {
    let cms = MockCms::new();
    seed_ais(&cms, ScaStatus::Received);
    cms.forget_authorisation("auth-1");
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

    let response = resolver.get_sca_status(&consent_request("consent-1", "auth-1"));

    let error = response.error().unwrap();
    assert_eq!(error.error_type.to_string(), "AIS_403");
    assert!(error.contains(MessageErrorCode::ResourceUnknown403));
    assert_eq!(spi.status_calls(), 0);
}

// ─── PIIS ────────────────────────────────────────────────────────────

#[test]
fn piis_errors_are_tagged_piis() {
    let cms = MockCms::new();
    cms.put_piis(
        piis_consent("piis-1"),
        &[authorisation(
            "auth-9",
            "piis-1",
            AuthorisationType::Piis,
            ScaApproach::Decoupled,
            ScaStatus::Started,
        )],
    );
    let spi = MockSpi::answering(reports(SpiScaStatus::Other("weird".to_string())));
    let service = Arc::new(PiisAuthorisationStatusService::new(
        cms.clone(),
        cms.clone(),
        accessibility(&cms, profile()),
        piis_validation(&profile()),
    ));
    let resolver = ScaStatusResolver::new(
        service,
        spi,
        cms.clone(),
        MockDataProviders::new(),
        Arc::new(profile()),
    );

    let response = resolver.get_sca_status(&consent_request("piis-1", "auth-9"));
    assert_eq!(response.error().unwrap().error_type.to_string(), "PIIS_500");
}

// ─── PIS and trusted beneficiaries ───────────────────────────────────

fn seed_payment(cms: &MockCms) {
    cms.put_payment(
        payment("payment-1"),
        &[
            authorisation(
                "init-1",
                "payment-1",
                AuthorisationType::Pis,
                ScaApproach::Redirect,
                ScaStatus::Started,
            ),
            authorisation(
                "cancel-1",
                "payment-1",
                AuthorisationType::PisCancellation,
                ScaApproach::Redirect,
                ScaStatus::Started,
            ),
        ],
    );
}

fn trusted_profile() -> AspspProfile {
    AspspProfile {
        trusted_beneficiaries_supported: true,
        ..AspspProfile::default()
    }
}

#[test]
fn cancellation_requests_trusted_beneficiary_flag_when_supported() {
    let cms = MockCms::new();
    seed_payment(&cms);
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let resolver = payment_resolver(&cms, spi.clone(), trusted_profile(), true);

    let body = resolver
        .get_sca_status(&payment_request("cancel-1"))
        .into_result()
        .unwrap();
    assert_eq!(body.trusted_beneficiary_flag, Some(true));
    assert_eq!(spi.flag_calls(), 1);
    assert_eq!(
        cms.updates(),
        vec![(AuthorisationId::new("cancel-1"), ScaStatus::Finalised)]
    );
}

#[test]
fn initiation_never_requests_the_flag() {
    let cms = MockCms::new();
    seed_payment(&cms);
    let spi = MockSpi::answering(reports(SpiScaStatus::Started));
    let resolver = payment_resolver(&cms, spi.clone(), trusted_profile(), false);

    let body = resolver
        .get_sca_status(&payment_request("init-1"))
        .into_result()
        .unwrap();
    assert_eq!(body.trusted_beneficiary_flag, None);
    assert_eq!(spi.flag_calls(), 0);
}

#[test]
fn cancellation_without_profile_support_skips_the_flag() {
    let cms = MockCms::new();
    seed_payment(&cms);
    let spi = MockSpi::answering(reports(SpiScaStatus::Started));
    let resolver = payment_resolver(&cms, spi.clone(), profile(), true);

    let body = resolver
        .get_sca_status(&payment_request("cancel-1"))
        .into_result()
        .unwrap();
    assert_eq!(body.trusted_beneficiary_flag, None);
    assert_eq!(spi.flag_calls(), 0);
}

#[test]
fn trusted_beneficiary_error_is_mapped_as_pis() {
    let cms = MockCms::new();
    seed_payment(&cms);
    let spi = MockSpi::with_flag(
        reports(SpiScaStatus::Started),
        spi_failure(MessageErrorCode::FormatError),
    );
    let resolver = payment_resolver(&cms, spi, trusted_profile(), true);

    let response = resolver.get_sca_status(&payment_request("cancel-1"));
    assert_eq!(response.error().unwrap().error_type.to_string(), "PIS_400");
}

#[test]
fn initiation_service_does_not_see_cancellation_authorisations() {
    let cms = MockCms::new();
    seed_payment(&cms);
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let resolver = payment_resolver(&cms, spi.clone(), profile(), false);

    let response = resolver.get_sca_status(&payment_request("cancel-1"));
    assert!(response.has_error());
    assert_eq!(spi.status_calls(), 0);
}

#[test]
fn missing_payment_is_not_found() {
    let cms = MockCms::new();
    let spi = MockSpi::answering(reports(SpiScaStatus::Finalised));
    let resolver = payment_resolver(&cms, spi, profile(), false);

    let response = resolver.get_sca_status(&payment_request("init-1"));
    let error = response.error().unwrap();
    assert_eq!(error.error_type.to_string(), "PIS_404");
    assert!(error.contains(MessageErrorCode::ResourceUnknown404));
}

#[test]
fn envelope_falls_back_to_the_first_psu() {
    let cms = MockCms::new();
    let mut anonymous = authorisation(
        "auth-1",
        "consent-1",
        AuthorisationType::Ais,
        ScaApproach::Embedded,
        ScaStatus::Received,
    );
    anonymous.psu_id_data = None;
    cms.put_ais(ais_consent("consent-1"), &[anonymous]);
    let spi = MockSpi::answering(reports(SpiScaStatus::Received));
    let (resolver, _) = ais_resolver(&cms, spi.clone(), profile());

    resolver.get_sca_status(&consent_request("consent-1", "auth-1"));
    assert_eq!(spi.last_psu(), Some(psu()));
    assert_ne!(spi.last_psu(), Some(PsuIdData::default()));
}
