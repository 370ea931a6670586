//! # xs2a-service — SCA Decision Services
//!
//! Orchestration layer of the SCA authorisation engine. It talks to the
//! outside world only through collaborator traits:
//!
//! - **CMS** (`cms.rs`): authorisation records, consent and payment
//!   snapshots, consent creation.
//! - **Bank adapter** (`spi.rs`): current SCA status and the
//!   trusted-beneficiary flag, plus the [`SpiErrorMapper`] that turns
//!   adapter errors into service-tagged error holders.
//! - **ASPSP profile** (`profile.rs`): the YAML-backed implementation of
//!   `xs2a_core::AspspProfileService`.
//!
//! On top of these it provides:
//!
//! - [`EndpointAccessibilityChecker`]: may the update endpoint of an
//!   authorisation be called at all.
//! - Authorisation status services (AIS, PIIS, PIS initiation, PIS
//!   cancellation): status envelopes and the PSU-data update precheck.
//! - [`ScaStatusResolver`]: merges the known status with the adapter's.
//! - [`ConsentCreationResponseService`]: folds the CMS creation answer
//!   into a uniform response.
//!
//! ## Design
//!
//! Every call is synchronous and request scoped. Collaborators are
//! `Arc<dyn Trait>` shared across requests; nothing here holds mutable
//! state. Exposed operations return `ResponseObject`; internal steps use
//! [`ServiceError`] and convert once at the edge.

pub mod access;
pub mod authorisation;
pub mod cms;
pub mod consent_creation;
pub mod error;
pub mod profile;
pub mod sca_status;
pub mod spi;

pub use access::EndpointAccessibilityChecker;
pub use authorisation::{
    AisAuthorisationStatusService, AuthorisationStatusService, ConsentAuthorisationStatusService,
    ConsentPsuDataUpdate, ConsentScaStatusRequest, PaymentAuthorisationStatusService,
    PaymentPsuDataUpdate, PaymentScaStatusRequest, PiisAuthorisationStatusService,
    ScaStatusEnvelope, ScaStatusQuery, StoredConsent,
};
pub use cms::{
    AuthorisationCms, CmsError, CmsResponse, CmsResponseError, ConsentCms, ConsentCreationCms,
    CreatedConsent, PaymentCms,
};
pub use consent_creation::ConsentCreationResponseService;
pub use error::ServiceError;
pub use profile::{AspspProfile, ProfileError};
pub use sca_status::{ScaStatusResolver, ScaStatusResponse};
pub use spi::{
    AspspConsentDataProviderFactory, ScaStatusSpi, SpiAspspConsentDataProvider, SpiContextData,
    SpiErrorMapper, SpiResponse, SpiScaStatus, SpiScaStatusResponse,
};
