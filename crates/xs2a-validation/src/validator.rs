//! # Business Validator
//!
//! The single abstraction every rule evaluator implements. A validator
//! receives one typed validation object bundling the resource snapshot
//! with the operation parameters and returns a `ValidationResult`.
//!
//! Validators that only advise (TPP URI domain, notification data)
//! return `Valid` from `validate` and report through
//! `build_warning_messages`. Warnings never block an operation.

use xs2a_core::TppMessage;

use crate::result::ValidationResult;

/// A rule evaluator over validation objects of type `O`.
///
/// Object safe and `Send + Sync` so services can hold validators as
/// `Box<dyn BusinessValidator<O>>` and tests can substitute their own.
pub trait BusinessValidator<O>: Send + Sync {
    /// Blocking validation.
    fn validate(&self, object: &O) -> ValidationResult;

    /// Advisory messages for `object`. Empty by default.
    fn build_warning_messages(&self, _object: &O) -> Vec<TppMessage> {
        Vec::new()
    }
}
