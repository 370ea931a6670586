//! Consent status and validity checks.

use chrono::NaiveDate;

use xs2a_core::{ConsentStatus, MessageError, MessageErrorCode, ServiceType};

use crate::objects::ConsentResource;

/// A consent in a terminal status cannot be authorised any more.
///
/// Reads of such consents stay allowed; only authorisation starts and
/// updates use this check.
pub fn check_consent_authorisable(
    service_type: ServiceType,
    status: ConsentStatus,
) -> Result<(), MessageError> {
    if status.is_terminal() {
        Err(MessageError::of(service_type, MessageErrorCode::ConsentInvalid))
    } else {
        Ok(())
    }
}

/// The consent must not be past its validity date on `today`.
pub fn check_consent_not_expired<C: ConsentResource>(
    consent: &C,
    today: NaiveDate,
) -> Result<(), MessageError> {
    if consent.is_expired(today) {
        Err(MessageError::of(C::SERVICE_TYPE, MessageErrorCode::ConsentExpired))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ais_consent, piis_consent};

    #[test]
    fn revoked_consent_is_not_authorisable() {
        let err =
            check_consent_authorisable(ServiceType::Ais, ConsentStatus::RevokedByPsu).unwrap_err();
        assert!(err.contains(MessageErrorCode::ConsentInvalid));
        assert!(check_consent_authorisable(ServiceType::Ais, ConsentStatus::Received).is_ok());
    }

    #[test]
    fn expired_consent_is_tagged_with_its_service() {
        let mut consent = ais_consent();
        consent.valid_until = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let err = check_consent_not_expired(&consent, today).unwrap_err();
        assert_eq!(err.error_type.to_string(), "AIS_401");

        let mut piis = piis_consent();
        piis.valid_until = Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let err = check_consent_not_expired(&piis, today).unwrap_err();
        assert_eq!(err.error_type.to_string(), "PIIS_401");
    }
}
