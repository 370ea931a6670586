//! # Resource Identity Newtypes
//!
//! Newtype wrappers for the identifiers the XS2A API exposes to TPPs.
//! These prevent accidental identifier confusion: you cannot pass a
//! `PaymentId` where an `AuthorisationId` is expected.
//!
//! Identifiers are opaque strings. The CMS may hand out encrypted ids, so
//! no format is assumed beyond non-emptiness; freshly generated ids are
//! UUID v4 strings.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces keeps an
//! authorisation id from one resource from being looked up as the id of
//! another kind of resource.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an AIS or PIIS consent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsentId(pub String);

/// Identifier of a payment initiation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub String);

/// Identifier of an authorisation sub-resource (initiation or cancellation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorisationId(pub String);

impl ConsentId {
    /// Wrap an existing consent identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random consent identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PaymentId {
    /// Wrap an existing payment identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random payment identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AuthorisationId {
    /// Wrap an existing authorisation identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random authorisation identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConsentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AuthorisationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
