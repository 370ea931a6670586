//! # Consent Validators
//!
//! Validators shared by AIS and PIIS consents. Each is generic over the
//! consent snapshot type; the service type used in errors comes from
//! [`ConsentResource::SERVICE_TYPE`].
//!
//! ## Check order
//!
//! - read / status / delete / list authorisations: TPP.
//! - start authorisation: TPP, consent status, expiry, PSU, finalised PSU.
//! - read authorisation SCA status: TPP, authorisation ownership.
//! - update PSU data: TPP, authorisation ownership, authorisation status,
//!   PSU. Expiry is checked by the caller once the PSU has been vetted, so
//!   a wrong PSU still fails the authorisation on an expired consent.

use std::marker::PhantomData;

use chrono::{NaiveDate, Utc};
use xs2a_core::MessageError;

use crate::checks;
use crate::objects::{
    CommonConsentObject, ConsentResource, CreateConsentAuthorisationObject,
    GetConsentAuthorisationScaStatusObject, UpdateConsentPsuDataObject,
};
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;

/// Source of the current date for expiry checks.
pub type Clock = fn() -> NaiveDate;

/// Today's date in UTC.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

// ─── Common ──────────────────────────────────────────────────────────

/// TPP ownership only.
pub struct CommonConsentValidator<C> {
    _consent: PhantomData<fn() -> C>,
}

impl<C> CommonConsentValidator<C> {
    pub fn new() -> Self {
        Self {
            _consent: PhantomData,
        }
    }
}

impl<C> Default for CommonConsentValidator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConsentResource> BusinessValidator<CommonConsentObject<C>> for CommonConsentValidator<C> {
    fn validate(&self, object: &CommonConsentObject<C>) -> ValidationResult {
        checks::check_tpp(C::SERVICE_TYPE, object.consent.tpp_info(), &object.tpp_info).into()
    }
}

// ─── Create Authorisation ────────────────────────────────────────────

/// Start of a consent authorisation.
pub struct CreateConsentAuthorisationValidator<C> {
    today: Clock,
    _consent: PhantomData<fn() -> C>,
}

impl<C> CreateConsentAuthorisationValidator<C> {
    pub fn new() -> Self {
        Self::with_clock(utc_today)
    }

    pub fn with_clock(today: Clock) -> Self {
        Self {
            today,
            _consent: PhantomData,
        }
    }
}

impl<C> Default for CreateConsentAuthorisationValidator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConsentResource> CreateConsentAuthorisationValidator<C> {
    fn run(&self, object: &CreateConsentAuthorisationObject<C>) -> Result<(), MessageError> {
        let service = C::SERVICE_TYPE;
        let consent = &object.consent;
        checks::check_tpp(service, consent.tpp_info(), &object.tpp_info)?;
        checks::check_consent_authorisable(service, consent.consent_status())?;
        checks::check_consent_not_expired(consent, (self.today)())?;
        checks::check_psu_for_new_authorisation(service, consent, &object.psu_id_data)?;
        checks::check_no_finalised_authorisation_for_psu(
            service,
            consent,
            &object.psu_id_data,
            C::AUTHORISATION_TYPE,
        )
    }
}

impl<C: ConsentResource> BusinessValidator<CreateConsentAuthorisationObject<C>>
    for CreateConsentAuthorisationValidator<C>
{
    fn validate(&self, object: &CreateConsentAuthorisationObject<C>) -> ValidationResult {
        self.run(object).into()
    }
}

// ─── Authorisation SCA Status ────────────────────────────────────────

/// Read of an authorisation's SCA status.
pub struct GetConsentAuthorisationScaStatusValidator<C> {
    _consent: PhantomData<fn() -> C>,
}

impl<C> GetConsentAuthorisationScaStatusValidator<C> {
    pub fn new() -> Self {
        Self {
            _consent: PhantomData,
        }
    }
}

impl<C> Default for GetConsentAuthorisationScaStatusValidator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConsentResource> BusinessValidator<GetConsentAuthorisationScaStatusObject<C>>
    for GetConsentAuthorisationScaStatusValidator<C>
{
    fn validate(&self, object: &GetConsentAuthorisationScaStatusObject<C>) -> ValidationResult {
        let service = C::SERVICE_TYPE;
        let run = || -> Result<(), MessageError> {
            checks::check_tpp(service, object.consent.tpp_info(), &object.tpp_info)?;
            checks::check_authorisation_belongs(
                service,
                &object.consent,
                &object.authorisation_id,
                C::AUTHORISATION_TYPE,
            )?;
            Ok(())
        };
        run().into()
    }
}

// ─── Update PSU Data ─────────────────────────────────────────────────

/// PSU data update on a consent authorisation.
pub struct UpdateConsentPsuDataValidator<C> {
    _consent: PhantomData<fn() -> C>,
}

impl<C> UpdateConsentPsuDataValidator<C> {
    pub fn new() -> Self {
        Self {
            _consent: PhantomData,
        }
    }
}

impl<C> Default for UpdateConsentPsuDataValidator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConsentResource> UpdateConsentPsuDataValidator<C> {
    fn run(&self, object: &UpdateConsentPsuDataObject<C>) -> Result<(), MessageError> {
        let service = C::SERVICE_TYPE;
        let consent = &object.consent;
        checks::check_tpp(service, consent.tpp_info(), &object.tpp_info)?;
        let authorisation = checks::check_authorisation_belongs(
            service,
            consent,
            &object.update.authorisation_id,
            C::AUTHORISATION_TYPE,
        )?;
        checks::check_authorisation_not_terminal(service, authorisation)?;
        checks::check_psu_for_update(service, authorisation, &object.update.psu_data)
    }
}

impl<C: ConsentResource> BusinessValidator<UpdateConsentPsuDataObject<C>>
    for UpdateConsentPsuDataValidator<C>
{
    fn validate(&self, object: &UpdateConsentPsuDataObject<C>) -> ValidationResult {
        self.run(object).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::UpdateAuthorisationRequest;
    use crate::test_support::{ais_consent, authorisation, piis_consent, tpp};
    use xs2a_core::{
        AisConsent, AuthorisationId, AuthorisationType, ConsentStatus, MessageErrorCode,
        PiisConsent, PsuIdData, ScaStatus, TppInfo,
    };

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn code_of(result: &ValidationResult) -> Option<MessageErrorCode> {
        result
            .message_error()
            .and_then(|e| e.tpp_message())
            .map(|m| m.code)
    }

    #[test]
    fn common_rejects_foreign_tpp() {
        let v = CommonConsentValidator::<AisConsent>::new();
        let ok = CommonConsentObject {
            consent: ais_consent(),
            tpp_info: tpp(),
        };
        assert!(v.validate(&ok).is_valid());
        let foreign = CommonConsentObject {
            consent: ais_consent(),
            tpp_info: TppInfo::new("someone-else"),
        };
        assert_eq!(code_of(&v.validate(&foreign)), Some(MessageErrorCode::Unauthorized));
    }

    #[test]
    fn create_authorisation_on_revoked_consent_is_consent_invalid() {
        let v = CreateConsentAuthorisationValidator::<AisConsent>::with_clock(fixed_today);
        let mut consent = ais_consent();
        consent.consent_status = ConsentStatus::RevokedByPsu;
        let result = v.validate(&CreateConsentAuthorisationObject {
            consent,
            tpp_info: tpp(),
            psu_id_data: PsuIdData::new("psu-1"),
        });
        assert_eq!(code_of(&result), Some(MessageErrorCode::ConsentInvalid));
    }

    #[test]
    fn create_authorisation_on_expired_consent_is_consent_expired() {
        let v = CreateConsentAuthorisationValidator::<AisConsent>::with_clock(fixed_today);
        let mut consent = ais_consent();
        consent.valid_until = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let result = v.validate(&CreateConsentAuthorisationObject {
            consent,
            tpp_info: tpp(),
            psu_id_data: PsuIdData::new("psu-1"),
        });
        assert_eq!(code_of(&result), Some(MessageErrorCode::ConsentExpired));
    }

    #[test]
    fn create_authorisation_for_finalised_psu_is_status_invalid() {
        let v = CreateConsentAuthorisationValidator::<AisConsent>::with_clock(fixed_today);
        let mut consent = ais_consent();
        consent.psu_id_data_list = vec![PsuIdData::new("psu-1")];
        consent.authorisations.push(
            authorisation("auth-1", AuthorisationType::Ais, ScaStatus::Finalised)
                .with_psu(PsuIdData::new("psu-1")),
        );
        let result = v.validate(&CreateConsentAuthorisationObject {
            consent,
            tpp_info: tpp(),
            psu_id_data: PsuIdData::new("psu-1"),
        });
        let err = result.message_error().unwrap();
        assert_eq!(err.error_type.to_string(), "AIS_409");
    }

    #[test]
    fn create_authorisation_for_piis_uses_piis_errors() {
        let v = CreateConsentAuthorisationValidator::<PiisConsent>::with_clock(fixed_today);
        let mut consent = piis_consent();
        consent.psu_id_data_list = vec![PsuIdData::new("psu-1")];
        let result = v.validate(&CreateConsentAuthorisationObject {
            consent,
            tpp_info: tpp(),
            psu_id_data: PsuIdData::new("intruder"),
        });
        let err = result.message_error().unwrap();
        assert_eq!(err.error_type.to_string(), "PIIS_401");
        assert!(err.contains(MessageErrorCode::PsuCredentialsInvalid));
    }

    #[test]
    fn sca_status_read_requires_own_authorisation() {
        let v = GetConsentAuthorisationScaStatusValidator::<AisConsent>::new();
        let mut consent = ais_consent();
        consent
            .authorisations
            .push(authorisation("auth-1", AuthorisationType::Ais, ScaStatus::Received));
        let ok = GetConsentAuthorisationScaStatusObject {
            consent: consent.clone(),
            tpp_info: tpp(),
            authorisation_id: AuthorisationId::new("auth-1"),
        };
        assert!(v.validate(&ok).is_valid());

        let unknown = GetConsentAuthorisationScaStatusObject {
            consent,
            tpp_info: tpp(),
            authorisation_id: AuthorisationId::new("auth-2"),
        };
        let result = v.validate(&unknown);
        assert_eq!(code_of(&result), Some(MessageErrorCode::ResourceUnknown403));
        assert_eq!(
            result.message_error().unwrap().error_type.to_string(),
            "AIS_403"
        );
    }

    #[test]
    fn update_on_finalised_authorisation_is_status_invalid() {
        let v = UpdateConsentPsuDataValidator::<AisConsent>::new();
        let mut consent = ais_consent();
        consent
            .authorisations
            .push(authorisation("auth-1", AuthorisationType::Ais, ScaStatus::Finalised));
        let result = v.validate(&UpdateConsentPsuDataObject {
            consent,
            tpp_info: tpp(),
            update: UpdateAuthorisationRequest::new(
                AuthorisationId::new("auth-1"),
                PsuIdData::new("psu-1"),
            ),
        });
        assert_eq!(code_of(&result), Some(MessageErrorCode::StatusInvalid));
    }

    #[test]
    fn update_with_wrong_psu_is_credentials_invalid() {
        let v = UpdateConsentPsuDataValidator::<AisConsent>::new();
        let mut consent = ais_consent();
        consent.authorisations.push(
            authorisation("auth-1", AuthorisationType::Ais, ScaStatus::PsuIdentified)
                .with_psu(PsuIdData::new("psu-1")),
        );
        let result = v.validate(&UpdateConsentPsuDataObject {
            consent,
            tpp_info: tpp(),
            update: UpdateAuthorisationRequest::new(
                AuthorisationId::new("auth-1"),
                PsuIdData::new("psu-2"),
            ),
        });
        assert_eq!(code_of(&result), Some(MessageErrorCode::PsuCredentialsInvalid));
    }

    #[test]
    fn update_does_not_look_at_consent_expiry() {
        let v = UpdateConsentPsuDataValidator::<AisConsent>::new();
        let mut consent = ais_consent();
        consent.valid_until = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        consent.authorisations.push(
            authorisation("auth-1", AuthorisationType::Ais, ScaStatus::PsuIdentified)
                .with_psu(PsuIdData::new("psu-1")),
        );
        let object = |psu: &str| UpdateConsentPsuDataObject {
            consent: consent.clone(),
            tpp_info: tpp(),
            update: UpdateAuthorisationRequest::new(
                AuthorisationId::new("auth-1"),
                PsuIdData::new(psu),
            ),
        };
        assert!(v.validate(&object("psu-1")).is_valid());
        assert_eq!(
            code_of(&v.validate(&object("intruder"))),
            Some(MessageErrorCode::PsuCredentialsInvalid)
        );
    }
}
