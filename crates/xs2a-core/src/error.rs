//! # Error Types — Service-Tagged Error Model
//!
//! Errors returned to TPPs are `MessageError`s: an `ErrorType` naming the
//! service domain and HTTP status (`AIS_401`, `PIS_403`) plus one or more
//! `TppMessage`s carrying a `MessageErrorCode` and optional text.
//!
//! ## Design
//!
//! - `ErrorType` is a pair, not a flat enum. Shared checks take the
//!   `ServiceType` of the calling validator and build the right pair.
//! - `MessageErrorCode` knows its HTTP status and its wire name; several
//!   codes share a wire name (`RESOURCE_UNKNOWN_403`/`_404` are both
//!   `RESOURCE_UNKNOWN` on the wire).
//! - `ErrorHolder` is the shape produced by the bank-adapter boundary; it
//!   converts losslessly into a `MessageError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Service Type ────────────────────────────────────────────────────

/// XS2A service domain an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    /// Account information.
    Ais,
    /// Payment initiation (including cancellation).
    Pis,
    /// Funds confirmation for card-based instruments.
    Piis,
}

impl ServiceType {
    /// Error type for this service with the given HTTP status.
    pub fn error_type(self, status_code: u16) -> ErrorType {
        ErrorType::new(self, status_code)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ais => "AIS",
            Self::Pis => "PIS",
            Self::Piis => "PIIS",
        };
        f.write_str(s)
    }
}

// ─── Error Type ──────────────────────────────────────────────────────

/// Service domain plus HTTP status, rendered as `AIS_401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorType {
    pub service_type: ServiceType,
    pub status_code: u16,
}

impl ErrorType {
    pub fn new(service_type: ServiceType, status_code: u16) -> Self {
        Self {
            service_type,
            status_code,
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.service_type, self.status_code)
    }
}

// ─── Message Error Code ──────────────────────────────────────────────

/// Berlin Group message codes used by the SCA engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageErrorCode {
    FormatError,
    FormatErrorNoPsu,
    FormatErrorInvalidDomain,
    FormatErrorInvalidNotificationMode,
    ServiceInvalid400,
    ServiceInvalid405,
    ServiceBlocked,
    Unauthorized,
    PsuCredentialsInvalid,
    ConsentInvalid,
    ConsentExpired,
    ConsentUnknown403,
    ResourceUnknown400,
    ResourceUnknown403,
    ResourceUnknown404,
    ProductInvalidForPayment,
    CancellationInvalid,
    StatusInvalid,
    InternalServerError,
}

impl MessageErrorCode {
    /// HTTP status associated with the code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::FormatError
            | Self::FormatErrorNoPsu
            | Self::FormatErrorInvalidDomain
            | Self::FormatErrorInvalidNotificationMode
            | Self::ServiceInvalid400
            | Self::ResourceUnknown400 => 400,
            Self::Unauthorized
            | Self::PsuCredentialsInvalid
            | Self::ConsentInvalid
            | Self::ConsentExpired => 401,
            Self::ServiceBlocked
            | Self::ConsentUnknown403
            | Self::ResourceUnknown403
            | Self::ProductInvalidForPayment => 403,
            Self::ResourceUnknown404 => 404,
            Self::ServiceInvalid405 | Self::CancellationInvalid => 405,
            Self::StatusInvalid => 409,
            Self::InternalServerError => 500,
        }
    }

    /// Code as it appears in the `code` field of a TPP message.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FormatError
            | Self::FormatErrorNoPsu
            | Self::FormatErrorInvalidDomain
            | Self::FormatErrorInvalidNotificationMode => "FORMAT_ERROR",
            Self::ServiceInvalid400 | Self::ServiceInvalid405 => "SERVICE_INVALID",
            Self::ServiceBlocked => "SERVICE_BLOCKED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::PsuCredentialsInvalid => "PSU_CREDENTIALS_INVALID",
            Self::ConsentInvalid => "CONSENT_INVALID",
            Self::ConsentExpired => "CONSENT_EXPIRED",
            Self::ConsentUnknown403 => "CONSENT_UNKNOWN",
            Self::ResourceUnknown400 | Self::ResourceUnknown403 | Self::ResourceUnknown404 => {
                "RESOURCE_UNKNOWN"
            }
            Self::ProductInvalidForPayment => "PRODUCT_INVALID",
            Self::CancellationInvalid => "CANCELLATION_INVALID",
            Self::StatusInvalid => "STATUS_INVALID",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Default human-readable text.
    pub fn default_text(&self) -> &'static str {
        match self {
            Self::FormatError => {
                "Format of certain request fields are not matching the XS2A requirements"
            }
            Self::FormatErrorNoPsu => "Please provide the PSU identification data",
            Self::FormatErrorInvalidDomain => {
                "TPP URIs are not compliant with the domain secured by the eIDAS QWAC certificate of the TPP in the field CN or SubjectAltName of the certificate"
            }
            Self::FormatErrorInvalidNotificationMode => {
                "Requested notification mode is not supported by the ASPSP"
            }
            Self::ServiceInvalid400 | Self::ServiceInvalid405 => {
                "The addressed service is not valid for the addressed resources or the submitted data"
            }
            Self::ServiceBlocked => {
                "This service is not reachable for the addressed PSU due to a channel independent blocking by the ASPSP"
            }
            Self::Unauthorized => {
                "The TPP or the PSU is not correctly authorized to perform the request"
            }
            Self::PsuCredentialsInvalid => {
                "The PSU-ID cannot be matched by the addressed ASPSP or is blocked, or a password resp. OTP was not correct"
            }
            Self::ConsentInvalid => {
                "The consent was created by this TPP but is not valid for the addressed service/resource"
            }
            Self::ConsentExpired => {
                "The consent was created by this TPP but has expired and needs to be renewed"
            }
            Self::ConsentUnknown403 => {
                "The consent-ID cannot be matched by the ASPSP relative to the TPP"
            }
            Self::ResourceUnknown400 => "The addressed resource is unknown relative to the TPP",
            Self::ResourceUnknown403 => "The addressed resource is not addressable by this request",
            Self::ResourceUnknown404 => "The addressed resource is unknown relative to the TPP",
            Self::ProductInvalidForPayment => "Payment product invalid for addressed payment",
            Self::CancellationInvalid => {
                "Payment initiation cannot be cancelled due to legal or other operational reasons"
            }
            Self::StatusInvalid => "The addressed resource does not allow additional authorisation",
            Self::InternalServerError => "Internal server error",
        }
    }
}

impl std::fmt::Display for MessageErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ─── TPP Messages ────────────────────────────────────────────────────

/// Whether a TPP message blocks the request or is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageCategory {
    Error,
    Warning,
}

/// A single message returned to the TPP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TppMessage {
    pub category: MessageCategory,
    pub code: MessageErrorCode,
    /// Overrides the code's default text when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TppMessage {
    /// Blocking message with the code's default text.
    pub fn error(code: MessageErrorCode) -> Self {
        Self {
            category: MessageCategory::Error,
            code,
            text: None,
        }
    }

    /// Advisory message with the code's default text.
    pub fn warning(code: MessageErrorCode) -> Self {
        Self {
            category: MessageCategory::Warning,
            code,
            text: None,
        }
    }

    /// Replace the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Text to render: the override, or the code's default.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_else(|| self.code.default_text())
    }
}

impl std::fmt::Display for TppMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.text())
    }
}

// ─── Message Error ───────────────────────────────────────────────────

/// A blocking error as returned to the TPP.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error_type}: {}", render_messages(.tpp_messages))]
pub struct MessageError {
    pub error_type: ErrorType,
    pub tpp_messages: Vec<TppMessage>,
}

impl MessageError {
    /// Error with a single blocking message.
    pub fn new(error_type: ErrorType, message: TppMessage) -> Self {
        Self {
            error_type,
            tpp_messages: vec![message],
        }
    }

    /// Error for `code`, tagged with `service_type` and the code's own status.
    pub fn of(service_type: ServiceType, code: MessageErrorCode) -> Self {
        Self::new(
            service_type.error_type(code.http_status()),
            TppMessage::error(code),
        )
    }

    /// First message, if any.
    pub fn tpp_message(&self) -> Option<&TppMessage> {
        self.tpp_messages.first()
    }

    /// Whether any message carries `code`.
    pub fn contains(&self, code: MessageErrorCode) -> bool {
        self.tpp_messages.iter().any(|m| m.code == code)
    }
}

fn render_messages(messages: &[TppMessage]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error produced at the bank-adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorHolder {
    pub error_type: ErrorType,
    pub tpp_messages: Vec<TppMessage>,
}

impl ErrorHolder {
    pub fn new(error_type: ErrorType, tpp_messages: Vec<TppMessage>) -> Self {
        Self {
            error_type,
            tpp_messages,
        }
    }
}

impl From<ErrorHolder> for MessageError {
    fn from(holder: ErrorHolder) -> Self {
        MessageError {
            error_type: holder.error_type,
            tpp_messages: holder.tpp_messages,
        }
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────

/// A string did not name any variant of a vocabulary enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownValueError {
    /// Which vocabulary was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownValueError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
