//! # PSU Identity and Normalizer
//!
//! The identity of the Payment Service User as supplied by the TPP in
//! request headers, together with optional device/browser metadata.
//!
//! ## Security Invariant
//!
//! A PSU identity crosses a trust boundary (log line, adapter context for a
//! non-authenticated call, audit export) only after `clear`. Clearing keeps
//! the originating IP address, which is retained for fraud and audit
//! purposes, and drops every other field.

use serde::{Deserialize, Serialize};

/// Device and browser metadata forwarded by the TPP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalPsuIdData {
    pub psu_ip_port: Option<String>,
    pub psu_user_agent: Option<String>,
    pub psu_geo_location: Option<String>,
    pub psu_accept: Option<String>,
    pub psu_accept_charset: Option<String>,
    pub psu_accept_encoding: Option<String>,
    pub psu_accept_language: Option<String>,
    pub psu_http_method: Option<String>,
    pub psu_device_id: Option<String>,
}

/// Identity of a Payment Service User.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsuIdData {
    /// PSU login identifier at the ASPSP.
    pub psu_id: Option<String>,
    /// Type of the PSU identifier (ASPSP specific).
    pub psu_id_type: Option<String>,
    /// Corporate identifier, for corporate PSUs.
    pub psu_corporate_id: Option<String>,
    /// Type of the corporate identifier.
    pub psu_corporate_id_type: Option<String>,
    /// IP address of the PSU's device as seen by the TPP.
    pub psu_ip_address: Option<String>,
    /// Optional device/browser metadata.
    pub additional_psu_id_data: Option<AdditionalPsuIdData>,
}

impl PsuIdData {
    /// Build an identity carrying only a PSU id.
    pub fn new(psu_id: impl Into<String>) -> Self {
        Self {
            psu_id: Some(psu_id.into()),
            ..Self::default()
        }
    }

    /// Set the originating IP address.
    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.psu_ip_address = Some(ip.into());
        self
    }

    /// True when no PSU id is present (absent or blank).
    pub fn is_empty(&self) -> bool {
        self.psu_id.as_deref().map_or(true, |id| id.trim().is_empty())
    }

    /// Negation of [`PsuIdData::is_empty`].
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Compare the identifying fields only.
    ///
    /// The IP address and the additional device metadata change between
    /// requests of the same PSU and are ignored.
    pub fn content_equals(&self, other: &PsuIdData) -> bool {
        self.psu_id == other.psu_id
            && self.psu_id_type == other.psu_id_type
            && self.psu_corporate_id == other.psu_corporate_id
            && self.psu_corporate_id_type == other.psu_corporate_id_type
    }

    /// A copy with every field except the IP address cleared.
    pub fn cleared(&self) -> PsuIdData {
        PsuIdData {
            psu_ip_address: self.psu_ip_address.clone(),
            ..PsuIdData::default()
        }
    }
}

/// Normalize an optional PSU identity for cross-boundary use.
///
/// Returns `None` for `None`; otherwise a new identity that keeps only the
/// originating IP address.
pub fn clear(identity: Option<&PsuIdData>) -> Option<PsuIdData> {
    identity.map(PsuIdData::cleared)
}
