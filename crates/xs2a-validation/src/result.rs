//! # Validation Result
//!
//! Outcome of a single validator call. Never persisted.

use xs2a_core::{MessageError, MessageErrorCode, ServiceType, TppMessage};

/// Valid, or invalid with the error to return to the TPP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(MessageError),
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::Valid
    }

    pub fn invalid(error: MessageError) -> Self {
        Self::Invalid(error)
    }

    /// Invalid result for `code`, tagged with `service_type`.
    pub fn of(service_type: ServiceType, code: MessageErrorCode) -> Self {
        Self::Invalid(MessageError::of(service_type, code))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_not_valid(&self) -> bool {
        !self.is_valid()
    }

    /// The error of an invalid result.
    pub fn message_error(&self) -> Option<&MessageError> {
        match self {
            Self::Valid => None,
            Self::Invalid(error) => Some(error),
        }
    }

    /// Warnings carried by an invalid result.
    pub fn warnings(&self) -> Vec<&TppMessage> {
        self.message_error()
            .map(|e| {
                e.tpp_messages
                    .iter()
                    .filter(|m| m.category == xs2a_core::MessageCategory::Warning)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn into_result(self) -> Result<(), MessageError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(error) => Err(error),
        }
    }
}

impl From<Result<(), MessageError>> for ValidationResult {
    fn from(result: Result<(), MessageError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(error) => Self::Invalid(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_has_no_error() {
        let result = ValidationResult::valid();
        assert!(result.is_valid());
        assert!(result.message_error().is_none());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn invalid_exposes_error() {
        let result = ValidationResult::of(ServiceType::Piis, MessageErrorCode::Unauthorized);
        assert!(result.is_not_valid());
        let err = result.message_error().unwrap();
        assert_eq!(err.error_type.to_string(), "PIIS_401");
    }

    #[test]
    fn converts_from_check_result() {
        let ok: Result<(), MessageError> = Ok(());
        assert_eq!(ValidationResult::from(ok), ValidationResult::Valid);
        let err: Result<(), MessageError> =
            Err(MessageError::of(ServiceType::Ais, MessageErrorCode::ConsentExpired));
        assert!(ValidationResult::from(err).is_not_valid());
    }

    #[test]
    fn warnings_are_filtered_by_category() {
        let mut error = MessageError::of(ServiceType::Ais, MessageErrorCode::FormatError);
        error
            .tpp_messages
            .push(TppMessage::warning(MessageErrorCode::FormatErrorInvalidDomain));
        let result = ValidationResult::invalid(error);
        assert_eq!(result.warnings().len(), 1);
    }
}
