//! Authorisation ownership and status checks.

use xs2a_core::{
    Authorisation, AuthorisationId, AuthorisationParent, AuthorisationType, MessageError,
    MessageErrorCode, PsuIdData, ServiceType,
};

/// The authorisation must belong to the resource, with the given type.
///
/// Returns the authorisation so later checks can inspect it.
pub fn check_authorisation_belongs<'a, P: AuthorisationParent + ?Sized>(
    service_type: ServiceType,
    parent: &'a P,
    authorisation_id: &AuthorisationId,
    authorisation_type: AuthorisationType,
) -> Result<&'a Authorisation, MessageError> {
    parent
        .find_authorisation(authorisation_id, authorisation_type)
        .ok_or_else(|| MessageError::of(service_type, MessageErrorCode::ResourceUnknown403))
}

/// A terminal authorisation accepts no further PSU data.
pub fn check_authorisation_not_terminal(
    service_type: ServiceType,
    authorisation: &Authorisation,
) -> Result<(), MessageError> {
    if authorisation.sca_status.is_terminal() {
        Err(MessageError::of(service_type, MessageErrorCode::StatusInvalid))
    } else {
        Ok(())
    }
}

/// A PSU that already finalised an authorisation of this type may not
/// start another one.
pub fn check_no_finalised_authorisation_for_psu<P: AuthorisationParent + ?Sized>(
    service_type: ServiceType,
    parent: &P,
    psu: &PsuIdData,
    authorisation_type: AuthorisationType,
) -> Result<(), MessageError> {
    if psu.is_empty() {
        return Ok(());
    }
    let finalised = parent.authorisations().iter().any(|a| {
        a.authorisation_type == authorisation_type
            && a.sca_status.is_finalised()
            && a.is_for_psu(psu)
    });
    if finalised {
        Err(MessageError::of(service_type, MessageErrorCode::StatusInvalid))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ais_consent, authorisation};
    use xs2a_core::ScaStatus;

    #[test]
    fn unknown_authorisation_is_resource_unknown_403() {
        let consent = ais_consent();
        let err = check_authorisation_belongs(
            ServiceType::Ais,
            &consent,
            &AuthorisationId::new("missing"),
            AuthorisationType::Ais,
        )
        .unwrap_err();
        assert_eq!(err.error_type.to_string(), "AIS_403");
        assert!(err.contains(MessageErrorCode::ResourceUnknown403));
    }

    #[test]
    fn wrong_type_is_not_found() {
        let mut consent = ais_consent();
        consent
            .authorisations
            .push(authorisation("auth-1", AuthorisationType::Ais, ScaStatus::Received));
        assert!(check_authorisation_belongs(
            ServiceType::Ais,
            &consent,
            &AuthorisationId::new("auth-1"),
            AuthorisationType::Ais
        )
        .is_ok());
        assert!(check_authorisation_belongs(
            ServiceType::Pis,
            &consent,
            &AuthorisationId::new("auth-1"),
            AuthorisationType::PisCancellation
        )
        .is_err());
    }

    #[test]
    fn terminal_authorisation_rejects_updates() {
        let auth = authorisation("auth-1", AuthorisationType::Ais, ScaStatus::Exempted);
        let err = check_authorisation_not_terminal(ServiceType::Ais, &auth).unwrap_err();
        assert_eq!(err.error_type.to_string(), "AIS_409");
    }

    #[test]
    fn finalised_for_same_psu_blocks_new_authorisation() {
        let mut consent = ais_consent();
        consent.authorisations.push(
            authorisation("auth-1", AuthorisationType::Ais, ScaStatus::Finalised)
                .with_psu(PsuIdData::new("psu-1")),
        );
        let err = check_no_finalised_authorisation_for_psu(
            ServiceType::Ais,
            &consent,
            &PsuIdData::new("psu-1"),
            AuthorisationType::Ais,
        )
        .unwrap_err();
        assert!(err.contains(MessageErrorCode::StatusInvalid));

        assert!(check_no_finalised_authorisation_for_psu(
            ServiceType::Ais,
            &consent,
            &PsuIdData::new("psu-2"),
            AuthorisationType::Ais,
        )
        .is_ok());
    }
}
