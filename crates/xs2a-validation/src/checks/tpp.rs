//! TPP ownership of a resource.

use xs2a_core::{MessageError, MessageErrorCode, ServiceType, TppInfo};

/// The requesting TPP must be the TPP that created the resource.
pub fn check_tpp(
    service_type: ServiceType,
    resource_tpp: &TppInfo,
    request_tpp: &TppInfo,
) -> Result<(), MessageError> {
    if resource_tpp.is_same_tpp(request_tpp) {
        Ok(())
    } else {
        Err(MessageError::of(service_type, MessageErrorCode::Unauthorized))
    }
}
