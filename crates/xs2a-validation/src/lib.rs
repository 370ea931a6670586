//! # xs2a-validation — Business Validation for XS2A Operations
//!
//! Every TPP request that touches a consent or a payment passes through a
//! validator before the service layer acts on it. This crate provides:
//!
//! - [`BusinessValidator`]: the validator contract (blocking `validate`,
//!   advisory `build_warning_messages`).
//! - [`checks`]: small service-tagged rules (TPP ownership, authorisation
//!   ownership, PSU identity, consent status, payment path).
//! - Concrete validators for AIS, PIIS and PIS operations, plus the
//!   authorisation stage check and the TPP warning validators.
//! - [`AisValidationService`], [`PiisValidationService`] and
//!   [`PisValidationService`]: one validator per operation, dispatched on
//!   a closed operation enum.
//!
//! ## Design
//!
//! Validators are pure functions of an immutable snapshot. They never
//! fetch, persist, or call the bank adapter; the first failing check
//! decides the result. Warnings never block a request.

pub mod ais;
pub mod checks;
pub mod consent;
pub mod objects;
pub mod piis;
pub mod pis;
pub mod result;
pub mod stage;
pub mod validator;
pub mod warnings;

#[cfg(test)]
pub(crate) mod test_support;

pub use ais::{AisOperation, AisValidationService, AisValidators, CreateConsentRequestValidator};
pub use consent::{
    CommonConsentValidator, CreateConsentAuthorisationValidator,
    GetConsentAuthorisationScaStatusValidator, UpdateConsentPsuDataValidator,
};
pub use objects::{
    AuthorisationStageObject, CommonConsentObject, CommonPaymentObject, ConsentResource,
    CreateConsentAuthorisationObject, CreateConsentRequest, CreateConsentRequestObject,
    CreatePaymentRequestObject, CreatePiisConsentRequest, CreatePiisConsentRequestObject,
    CreatePisAuthorisationObject, GetConsentAuthorisationScaStatusObject,
    GetPaymentScaStatusObject, PaymentRequestPath, UpdateAuthorisationRequest,
    UpdateConsentPsuDataObject, UpdatePisPsuDataObject,
};
pub use piis::{CreatePiisConsentValidator, PiisOperation, PiisValidationService, PiisValidators};
pub use pis::{
    CancelPaymentValidator, CommonPaymentValidator, CreatePaymentAuthorisationValidator,
    CreatePaymentValidator, PaymentAuthorisationScaStatusValidator, PisOperation,
    PisValidationService, PisValidators, UpdatePaymentPsuDataValidator,
};
pub use result::ValidationResult;
pub use stage::AuthorisationStageCheckValidator;
pub use validator::BusinessValidator;
pub use warnings::{TppDomainValidator, TppNotificationDataValidator};
