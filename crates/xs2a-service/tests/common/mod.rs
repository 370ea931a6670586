//! Hand-written collaborators with call counters, shared by the service
//! integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use xs2a_core::{
    AccountAccess, AisConsent, Authorisation, AuthorisationId, AuthorisationType, CommonPayment,
    ConsentId, ConsentStatus, PaymentId, PaymentType, PiisConsent, PsuIdData, ScaApproach,
    ScaRedirectFlow, ScaStatus, TppInfo, TppMessage, TransactionStatus,
};
use xs2a_service::{
    AspspConsentDataProviderFactory, AspspProfile, AuthorisationCms, CmsError, ConsentCms,
    EndpointAccessibilityChecker, PaymentCms, ScaStatusSpi, SpiAspspConsentDataProvider,
    SpiContextData, SpiResponse, SpiScaStatusResponse,
};
use xs2a_validation::{
    AisValidationService, PaymentRequestPath, PiisValidationService, PisValidationService,
};

// ─── CMS ─────────────────────────────────────────────────────────────

/// In-memory CMS. Status updates are applied and recorded.
#[derive(Default)]
pub struct MockCms {
    authorisations: Mutex<HashMap<AuthorisationId, Authorisation>>,
    ais: Mutex<HashMap<ConsentId, AisConsent>>,
    piis: Mutex<HashMap<ConsentId, PiisConsent>>,
    payments: Mutex<HashMap<PaymentId, CommonPayment>>,
    /// When set, every authorisation fetch fails technically.
    pub unavailable: AtomicBool,
    pub fetches: AtomicUsize,
    updates: Mutex<Vec<(AuthorisationId, ScaStatus)>>,
}

impl MockCms {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store the authorisation on its own and inside the parent snapshot.
    pub fn put_ais(&self, mut consent: AisConsent, authorisations: &[Authorisation]) {
        consent.authorisations.extend(authorisations.iter().cloned());
        self.put_authorisations(authorisations);
        self.ais.lock().unwrap().insert(consent.id.clone(), consent);
    }

    pub fn put_piis(&self, mut consent: PiisConsent, authorisations: &[Authorisation]) {
        consent.authorisations.extend(authorisations.iter().cloned());
        self.put_authorisations(authorisations);
        self.piis.lock().unwrap().insert(consent.id.clone(), consent);
    }

    pub fn put_payment(&self, mut payment: CommonPayment, authorisations: &[Authorisation]) {
        payment.authorisations.extend(authorisations.iter().cloned());
        self.put_authorisations(authorisations);
        self.payments
            .lock()
            .unwrap()
            .insert(payment.payment_id.clone(), payment);
    }

    fn put_authorisations(&self, authorisations: &[Authorisation]) {
        let mut map = self.authorisations.lock().unwrap();
        for authorisation in authorisations {
            map.insert(authorisation.authorisation_id.clone(), authorisation.clone());
        }
    }

    /// Drop the record but keep it in parent snapshots.
    pub fn forget_authorisation(&self, id: &str) {
        self.authorisations
            .lock()
            .unwrap()
            .remove(&AuthorisationId::new(id));
    }

    pub fn updates(&self) -> Vec<(AuthorisationId, ScaStatus)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn status_of(&self, id: &str) -> Option<ScaStatus> {
        self.authorisations
            .lock()
            .unwrap()
            .get(&AuthorisationId::new(id))
            .map(|a| a.sca_status)
    }
}

impl AuthorisationCms for MockCms {
    fn get_authorisation_by_id(
        &self,
        authorisation_id: &AuthorisationId,
    ) -> Result<Authorisation, CmsError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CmsError::Technical {
                reason: "CMS unreachable".to_string(),
            });
        }
        self.authorisations
            .lock()
            .unwrap()
            .get(authorisation_id)
            .cloned()
            .ok_or_else(|| CmsError::NotFound {
                resource: "authorisation",
                id: authorisation_id.to_string(),
            })
    }

    fn update_authorisation_status(
        &self,
        authorisation_id: &AuthorisationId,
        status: ScaStatus,
    ) -> Result<(), CmsError> {
        self.updates
            .lock()
            .unwrap()
            .push((authorisation_id.clone(), status));
        if let Some(record) = self.authorisations.lock().unwrap().get_mut(authorisation_id) {
            record.sca_status = status;
        }
        Ok(())
    }
}

impl ConsentCms for MockCms {
    fn get_ais_consent_by_id(&self, consent_id: &ConsentId) -> Option<AisConsent> {
        self.ais.lock().unwrap().get(consent_id).cloned()
    }

    fn get_piis_consent_by_id(&self, consent_id: &ConsentId) -> Option<PiisConsent> {
        self.piis.lock().unwrap().get(consent_id).cloned()
    }
}

impl PaymentCms for MockCms {
    fn get_payment_by_id(&self, payment_id: &PaymentId) -> Option<CommonPayment> {
        self.payments.lock().unwrap().get(payment_id).cloned()
    }
}

// ─── Bank Adapter ────────────────────────────────────────────────────

/// Adapter answering with fixed responses, for any business object.
pub struct MockSpi {
    status: SpiResponse<SpiScaStatusResponse>,
    flag: SpiResponse<bool>,
    pub status_calls: AtomicUsize,
    pub flag_calls: AtomicUsize,
    last_psu: Mutex<Option<PsuIdData>>,
}

impl MockSpi {
    pub fn answering(status: SpiResponse<SpiScaStatusResponse>) -> Arc<Self> {
        Self::with_flag(status, SpiResponse::Success(true))
    }

    pub fn with_flag(
        status: SpiResponse<SpiScaStatusResponse>,
        flag: SpiResponse<bool>,
    ) -> Arc<Self> {
        Arc::new(Self {
            status,
            flag,
            status_calls: AtomicUsize::new(0),
            flag_calls: AtomicUsize::new(0),
            last_psu: Mutex::new(None),
        })
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn flag_calls(&self) -> usize {
        self.flag_calls.load(Ordering::SeqCst)
    }

    /// PSU of the last adapter context.
    pub fn last_psu(&self) -> Option<PsuIdData> {
        self.last_psu.lock().unwrap().clone()
    }
}

impl<B> ScaStatusSpi<B> for MockSpi {
    fn get_sca_status(
        &self,
        _current: ScaStatus,
        context: &SpiContextData,
        _authorisation_id: &AuthorisationId,
        _business_object: &B,
        _data_provider: &dyn SpiAspspConsentDataProvider,
    ) -> SpiResponse<SpiScaStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_psu.lock().unwrap() = Some(context.psu_data.clone());
        self.status.clone()
    }

    fn request_trusted_beneficiary_flag(
        &self,
        _context: &SpiContextData,
        _authorisation_id: &AuthorisationId,
        _business_object: &B,
        _data_provider: &dyn SpiAspspConsentDataProvider,
    ) -> SpiResponse<bool> {
        self.flag_calls.fetch_add(1, Ordering::SeqCst);
        self.flag.clone()
    }
}

/// Adapter error with one message.
pub fn spi_failure<T>(code: xs2a_core::MessageErrorCode) -> SpiResponse<T> {
    SpiResponse::Failure(vec![TppMessage::error(code)])
}

// ─── Consent Data ────────────────────────────────────────────────────

struct EmptyProvider {
    resource_id: String,
}

impl SpiAspspConsentDataProvider for EmptyProvider {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn load_aspsp_consent_data(&self) -> Vec<u8> {
        Vec::new()
    }

    fn update_aspsp_consent_data(&self, _data: &[u8]) {}
}

/// Records which resources providers were requested for.
#[derive(Default)]
pub struct MockDataProviders {
    requested: Mutex<Vec<String>>,
}

impl MockDataProviders {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl AspspConsentDataProviderFactory for MockDataProviders {
    fn provider_for(&self, resource_id: &str) -> Box<dyn SpiAspspConsentDataProvider> {
        self.requested.lock().unwrap().push(resource_id.to_string());
        Box::new(EmptyProvider {
            resource_id: resource_id.to_string(),
        })
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────

pub fn tpp() -> TppInfo {
    TppInfo::new("tpp-1")
}

pub fn psu() -> PsuIdData {
    PsuIdData::new("psu-1").with_ip_address("10.0.0.1")
}

pub fn profile() -> AspspProfile {
    AspspProfile::default()
}

pub fn oauth_profile(confirmation_mandated: bool) -> AspspProfile {
    AspspProfile {
        sca_redirect_flow: ScaRedirectFlow::Oauth,
        authorisation_confirmation_request_mandated: confirmation_mandated,
        ..AspspProfile::default()
    }
}

pub fn accessibility(cms: &Arc<MockCms>, profile: AspspProfile) -> Arc<EndpointAccessibilityChecker> {
    Arc::new(EndpointAccessibilityChecker::new(
        cms.clone(),
        Arc::new(profile),
    ))
}

pub fn ais_validation(profile: &AspspProfile) -> Arc<AisValidationService> {
    Arc::new(AisValidationService::standard(Arc::new(profile.clone())))
}

pub fn piis_validation(profile: &AspspProfile) -> Arc<PiisValidationService> {
    Arc::new(PiisValidationService::standard(Arc::new(profile.clone())))
}

pub fn pis_validation(profile: &AspspProfile) -> Arc<PisValidationService> {
    Arc::new(PisValidationService::standard(Arc::new(profile.clone())))
}

pub fn ais_consent(id: &str) -> AisConsent {
    AisConsent {
        id: ConsentId::new(id),
        consent_status: ConsentStatus::Received,
        tpp_info: tpp(),
        access: AccountAccess::default(),
        psu_id_data_list: vec![psu()],
        authorisations: Vec::new(),
        multilevel_sca_required: false,
        recurring_indicator: true,
        frequency_per_day: 4,
        valid_until: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
    }
}

pub fn piis_consent(id: &str) -> PiisConsent {
    PiisConsent {
        id: ConsentId::new(id),
        consent_status: ConsentStatus::Received,
        tpp_info: tpp(),
        account: "DE89370400440532013000".to_string(),
        card_number: None,
        psu_id_data_list: vec![psu()],
        authorisations: Vec::new(),
        valid_until: None,
    }
}

pub fn payment(id: &str) -> CommonPayment {
    CommonPayment {
        payment_id: PaymentId::new(id),
        payment_type: PaymentType::Single,
        payment_product: "sepa-credit-transfers".to_string(),
        transaction_status: TransactionStatus::Rcvd,
        tpp_info: tpp(),
        psu_id_data_list: vec![psu()],
        authorisations: Vec::new(),
        multilevel_sca_required: false,
    }
}

pub fn payment_path() -> PaymentRequestPath {
    PaymentRequestPath::new(PaymentType::Single, "sepa-credit-transfers")
}

/// Authorisation started by [`psu`].
pub fn authorisation(
    id: &str,
    parent: &str,
    authorisation_type: AuthorisationType,
    approach: ScaApproach,
    status: ScaStatus,
) -> Authorisation {
    Authorisation::new(AuthorisationId::new(id), parent, authorisation_type, approach)
        .with_status(status)
        .with_psu(psu())
}
