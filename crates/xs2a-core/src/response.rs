//! # Response Envelope
//!
//! Uniform success/error envelope returned by every exposed operation.
//! Exactly one of body and error is present; advisory warnings may ride
//! along with either.

use serde::{Deserialize, Serialize};

use crate::error::{MessageError, TppMessage};

/// Outcome of an engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseObject<T> {
    outcome: Result<T, MessageError>,
    #[serde(default)]
    warnings: Vec<TppMessage>,
}

impl<T> ResponseObject<T> {
    pub fn success(body: T) -> Self {
        Self {
            outcome: Ok(body),
            warnings: Vec::new(),
        }
    }

    pub fn failure(error: impl Into<MessageError>) -> Self {
        Self {
            outcome: Err(error.into()),
            warnings: Vec::new(),
        }
    }

    /// Attach advisory messages.
    pub fn with_warnings(mut self, warnings: Vec<TppMessage>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn has_error(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn is_successful(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn body(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&MessageError> {
        self.outcome.as_ref().err()
    }

    pub fn warnings(&self) -> &[TppMessage] {
        &self.warnings
    }

    /// Transform the body, keeping error and warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseObject<U> {
        ResponseObject {
            outcome: self.outcome.map(f),
            warnings: self.warnings,
        }
    }

    /// Drop the warnings and expose the outcome.
    pub fn into_result(self) -> Result<T, MessageError> {
        self.outcome
    }
}

impl<T> From<Result<T, MessageError>> for ResponseObject<T> {
    fn from(outcome: Result<T, MessageError>) -> Self {
        Self {
            outcome,
            warnings: Vec::new(),
        }
    }
}
