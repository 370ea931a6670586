//! # SCA Vocabulary
//!
//! Status, approach and redirect-flow enums for Strong Customer
//! Authentication. Wire spellings follow the Berlin Group XS2A
//! specification (`"psuIdentified"`, `"REDIRECT"`); `Display` renders the
//! upper-case form used in logs and CLI output.
//!
//! The transition rules between statuses live in `xs2a-state`; this module
//! only names the states.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownValueError;

// ─── SCA Status ──────────────────────────────────────────────────────

/// Status of an SCA authorisation.
///
/// ```text
/// RECEIVED ──▶ PSUIDENTIFIED ──▶ PSUAUTHENTICATED ──▶ SCAMETHODSELECTED ──▶ STARTED ──▶ FINALISED
///     │              │                  │                     │                │
///     └──────────────┴──────────────────┴─────────────────────┴────────────────┴──▶ FAILED | EXEMPTED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaStatus {
    /// Authorisation sub-resource created.
    Received,
    /// The PSU has been identified.
    PsuIdentified,
    /// The PSU has been identified and authenticated (e.g. by password).
    PsuAuthenticated,
    /// An SCA method has been selected.
    ScaMethodSelected,
    /// SCA is in progress at the ASPSP (decoupled or redirect).
    Started,
    /// SCA completed successfully (terminal).
    Finalised,
    /// SCA failed (terminal).
    Failed,
    /// SCA was waived by the ASPSP (terminal).
    Exempted,
}

impl ScaStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ScaStatus; 8] = [
        Self::Received,
        Self::PsuIdentified,
        Self::PsuAuthenticated,
        Self::ScaMethodSelected,
        Self::Started,
        Self::Finalised,
        Self::Failed,
        Self::Exempted,
    ];

    /// Whether no further transition can leave this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalised | Self::Failed | Self::Exempted)
    }

    /// Whether SCA completed successfully.
    pub fn is_finalised(&self) -> bool {
        matches!(self, Self::Finalised)
    }

    /// Wire spelling (`"psuIdentified"`).
    pub fn value(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::PsuIdentified => "psuIdentified",
            Self::PsuAuthenticated => "psuAuthenticated",
            Self::ScaMethodSelected => "scaMethodSelected",
            Self::Started => "started",
            Self::Finalised => "finalised",
            Self::Failed => "failed",
            Self::Exempted => "exempted",
        }
    }
}

impl std::fmt::Display for ScaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Received => "RECEIVED",
            Self::PsuIdentified => "PSUIDENTIFIED",
            Self::PsuAuthenticated => "PSUAUTHENTICATED",
            Self::ScaMethodSelected => "SCAMETHODSELECTED",
            Self::Started => "STARTED",
            Self::Finalised => "FINALISED",
            Self::Failed => "FAILED",
            Self::Exempted => "EXEMPTED",
        };
        f.write_str(s)
    }
}

impl FromStr for ScaStatus {
    type Err = UnknownValueError;

    /// Accepts both the wire spelling and the upper-case display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.value().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownValueError::new("SCA status", s))
    }
}

// ─── SCA Approach ────────────────────────────────────────────────────

/// The way the PSU performs SCA for a given authorisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaApproach {
    /// PSU is redirected to the ASPSP's own pages.
    Redirect,
    /// PSU authenticates on a separate device, the TPP polls.
    Decoupled,
    /// Credentials and SCA data pass through the TPP's interface.
    Embedded,
    /// OAuth2 authorisation code flow.
    Oauth,
}

impl ScaApproach {
    /// All approaches.
    pub const ALL: [ScaApproach; 4] = [Self::Redirect, Self::Decoupled, Self::Embedded, Self::Oauth];
}

impl std::fmt::Display for ScaApproach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Redirect => "REDIRECT",
            Self::Decoupled => "DECOUPLED",
            Self::Embedded => "EMBEDDED",
            Self::Oauth => "OAUTH",
        };
        f.write_str(s)
    }
}

impl FromStr for ScaApproach {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|approach| approach.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownValueError::new("SCA approach", s))
    }
}

// ─── Redirect Flow ───────────────────────────────────────────────────

/// Redirect flow configured in the ASPSP profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaRedirectFlow {
    /// Plain redirect to the ASPSP's SCA pages.
    #[default]
    Redirect,
    /// OAuth integrated: the authorisation endpoint is the OAuth server.
    Oauth,
    /// OAuth pre-step: the PSU authorises the TPP before the request.
    OauthPreStep,
}

impl std::fmt::Display for ScaRedirectFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Redirect => "REDIRECT",
            Self::Oauth => "OAUTH",
            Self::OauthPreStep => "OAUTH_PRE_STEP",
        };
        f.write_str(s)
    }
}

// ─── Authentication Method ───────────────────────────────────────────

/// Metadata describing an SCA method offered to or chosen by the PSU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationObject {
    /// Method type, e.g. `SMS_OTP`, `PUSH_OTP`, `CHIP_OTP`.
    pub authentication_type: String,
    /// ASPSP internal identifier of the method.
    pub authentication_method_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Whether the method is performed on a separate device.
    #[serde(default)]
    pub decoupled: bool,
}
