//! Fixtures shared by the unit tests of this crate.

use chrono::NaiveDate;
use xs2a_core::{
    AccountAccess, AisConsent, AspspProfileService, Authorisation, AuthorisationId,
    AuthorisationType, CommonPayment, ConsentId, ConsentStatus, NotificationSupportedMode,
    PaymentId, PaymentType, PiisConsent, PsuIdData, ScaApproach, ScaRedirectFlow, ScaStatus,
    TppInfo, TransactionStatus,
};

use crate::objects::{CreateConsentRequest, CreateConsentRequestObject};

pub(crate) fn tpp() -> TppInfo {
    TppInfo::new("tpp-1")
}

fn far_future() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()
}

pub(crate) fn ais_consent() -> AisConsent {
    AisConsent {
        id: ConsentId::new("consent-1"),
        consent_status: ConsentStatus::Received,
        tpp_info: tpp(),
        access: AccountAccess::default(),
        psu_id_data_list: Vec::new(),
        authorisations: Vec::new(),
        multilevel_sca_required: false,
        recurring_indicator: true,
        frequency_per_day: 4,
        valid_until: far_future(),
    }
}

pub(crate) fn piis_consent() -> PiisConsent {
    PiisConsent {
        id: ConsentId::new("piis-1"),
        consent_status: ConsentStatus::Valid,
        tpp_info: tpp(),
        account: "DE89370400440532013000".to_string(),
        card_number: None,
        psu_id_data_list: Vec::new(),
        authorisations: Vec::new(),
        valid_until: Some(far_future()),
    }
}

pub(crate) fn payment() -> CommonPayment {
    CommonPayment {
        payment_id: PaymentId::new("payment-1"),
        payment_type: PaymentType::Single,
        payment_product: "sepa-credit-transfers".to_string(),
        transaction_status: TransactionStatus::Rcvd,
        tpp_info: tpp(),
        psu_id_data_list: Vec::new(),
        authorisations: Vec::new(),
        multilevel_sca_required: false,
    }
}

pub(crate) fn authorisation(
    id: &str,
    authorisation_type: AuthorisationType,
    status: ScaStatus,
) -> Authorisation {
    Authorisation::new(
        AuthorisationId::new(id),
        "consent-1",
        authorisation_type,
        ScaApproach::Redirect,
    )
    .with_status(status)
}

pub(crate) fn create_consent_request_object() -> CreateConsentRequestObject {
    CreateConsentRequestObject {
        request: CreateConsentRequest {
            access: AccountAccess::default(),
            recurring_indicator: true,
            frequency_per_day: 4,
            valid_until: far_future(),
            combined_service_indicator: false,
        },
        psu_id_data: PsuIdData::new("psu-1"),
        tpp_info: tpp(),
        sca_approach: ScaApproach::Redirect,
        tpp_notification_data: None,
    }
}

/// Profile with every switch exposed as a field.
#[derive(Debug, Clone, Default)]
pub(crate) struct StaticProfile {
    pub redirect_flow: ScaRedirectFlow,
    pub confirmation_mandated: bool,
    pub trusted_beneficiaries: bool,
    pub account_owner_information: bool,
    pub check_uri_compliance: bool,
    pub psu_in_initiation_mandated: bool,
    pub notification_modes: Vec<NotificationSupportedMode>,
}

impl AspspProfileService for StaticProfile {
    fn sca_redirect_flow(&self) -> ScaRedirectFlow {
        self.redirect_flow
    }

    fn is_authorisation_confirmation_request_mandated(&self) -> bool {
        self.confirmation_mandated
    }

    fn is_trusted_beneficiaries_supported(&self) -> bool {
        self.trusted_beneficiaries
    }

    fn is_account_owner_information_supported(&self) -> bool {
        self.account_owner_information
    }

    fn is_check_uri_compliance_to_domain_supported(&self) -> bool {
        self.check_uri_compliance
    }

    fn is_psu_in_initiation_mandated(&self) -> bool {
        self.psu_in_initiation_mandated
    }

    fn supported_notification_modes(&self) -> Vec<NotificationSupportedMode> {
        self.notification_modes.clone()
    }
}
