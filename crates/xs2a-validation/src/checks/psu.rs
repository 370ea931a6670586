//! PSU identity checks.

use xs2a_core::{
    Authorisation, AuthorisationParent, MessageError, MessageErrorCode, PsuIdData, ServiceType,
};

/// A PSU-ID is required at initiation when the profile mandates it.
pub fn check_psu_in_initiation(
    service_type: ServiceType,
    psu: &PsuIdData,
    mandated: bool,
) -> Result<(), MessageError> {
    if mandated && psu.is_empty() {
        Err(MessageError::of(service_type, MessageErrorCode::FormatErrorNoPsu))
    } else {
        Ok(())
    }
}

/// A PSU starting an authorisation must be one of the resource's PSUs.
///
/// Skipped when the request carries no PSU, when the resource knows no PSU
/// yet, and for multilevel resources (every signatory is a new PSU).
pub fn check_psu_for_new_authorisation<P: AuthorisationParent + ?Sized>(
    service_type: ServiceType,
    parent: &P,
    request_psu: &PsuIdData,
) -> Result<(), MessageError> {
    let known = parent.psu_id_data_list();
    if request_psu.is_empty() || known.is_empty() || parent.is_multilevel_sca_required() {
        return Ok(());
    }
    if known.iter().any(|psu| psu.content_equals(request_psu)) {
        Ok(())
    } else {
        Err(MessageError::of(
            service_type,
            MessageErrorCode::PsuCredentialsInvalid,
        ))
    }
}

/// PSU data sent with an update must match the PSU of the authorisation.
///
/// Both absent is a format error: nobody can be authenticated.
pub fn check_psu_for_update(
    service_type: ServiceType,
    authorisation: &Authorisation,
    request_psu: &PsuIdData,
) -> Result<(), MessageError> {
    let stored = authorisation
        .psu_id_data
        .as_ref()
        .filter(|psu| psu.is_not_empty());
    match stored {
        None if request_psu.is_empty() => Err(MessageError::of(
            service_type,
            MessageErrorCode::FormatErrorNoPsu,
        )),
        Some(stored) if request_psu.is_not_empty() && !stored.content_equals(request_psu) => {
            Err(MessageError::of(
                service_type,
                MessageErrorCode::PsuCredentialsInvalid,
            ))
        }
        _ => Ok(()),
    }
}
