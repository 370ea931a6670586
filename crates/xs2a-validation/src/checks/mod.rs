//! # Shared Checks
//!
//! Small rules reused by several validators. Each check returns
//! `Result<(), MessageError>` so a validator chains them with `?` and stops
//! at the first failure; the service type passed in decides whether the
//! error reads `AIS_…`, `PIS_…` or `PIIS_…`.

pub mod authorisation;
pub mod consent;
pub mod payment;
pub mod psu;
pub mod tpp;

pub use authorisation::{
    check_authorisation_belongs, check_authorisation_not_terminal,
    check_no_finalised_authorisation_for_psu,
};
pub use consent::{check_consent_authorisable, check_consent_not_expired};
pub use payment::{check_payment_cancellable, check_payment_path};
pub use psu::{check_psu_for_new_authorisation, check_psu_for_update, check_psu_in_initiation};
pub use tpp::check_tpp;
