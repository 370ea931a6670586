//! # xs2a-core — Foundational Types for the XS2A SCA Engine
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: resource identifiers, the PSU identity and its normalizer,
//! the SCA status/approach enums, immutable consent and payment snapshots,
//! and the service-tagged error model returned to TPPs.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ConsentId`, `PaymentId` and
//!    `AuthorisationId` are distinct types. A payment id cannot be passed
//!    where an authorisation id is expected.
//!
//! 2. **Snapshots, not records.** Consents, payments and authorisations are
//!    owned by the external CMS. The types here are read-only snapshots
//!    taken per call.
//!
//! 3. **Errors carry their service.** Every `MessageError` is tagged with an
//!    `ErrorType` (service type + HTTP status) so that the same validation
//!    rule can report `AIS_401` or `PIS_401` without duplication.
//!
//! 4. **PSU data leaves only in cleared form.** `psu::clear` keeps the IP
//!    address and drops everything else; the service layer logs PSU
//!    identities only through it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `xs2a-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod authorisation;
pub mod consent;
pub mod error;
pub mod identity;
pub mod payment;
pub mod profile;
pub mod psu;
pub mod response;
pub mod sca;
pub mod tpp;

// Re-export primary types for ergonomic imports.
pub use authorisation::{Authorisation, AuthorisationParent, AuthorisationType};
pub use consent::{AccountAccess, AisConsent, ConsentStatus, PiisConsent};
pub use error::{
    ErrorHolder, ErrorType, MessageCategory, MessageError, MessageErrorCode, ServiceType,
    TppMessage,
};
pub use identity::{AuthorisationId, ConsentId, PaymentId};
pub use payment::{CommonPayment, PaymentType, TransactionStatus};
pub use profile::AspspProfileService;
pub use psu::{clear, AdditionalPsuIdData, PsuIdData};
pub use response::ResponseObject;
pub use sca::{AuthenticationObject, ScaApproach, ScaRedirectFlow, ScaStatus};
pub use tpp::{NotificationSupportedMode, TppInfo, TppNotificationData, TppRedirectUri};
