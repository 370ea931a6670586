//! # Consent Snapshots
//!
//! Read-only views of AIS (account information) and PIIS (funds
//! confirmation) consents as returned by the CMS. Validation services take
//! one snapshot per call and never mutate it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::authorisation::{Authorisation, AuthorisationParent};
use crate::identity::ConsentId;
use crate::psu::PsuIdData;
use crate::tpp::TppInfo;

// ─── Consent Status ──────────────────────────────────────────────────

/// Lifecycle status of a consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsentStatus {
    Received,
    Rejected,
    Valid,
    RevokedByPsu,
    Expired,
    TerminatedByTpp,
    PartiallyAuthorised,
}

impl ConsentStatus {
    /// Whether the consent can no longer be used or authorised.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::RevokedByPsu | Self::Expired | Self::TerminatedByTpp
        )
    }
}

impl std::fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Received => "RECEIVED",
            Self::Rejected => "REJECTED",
            Self::Valid => "VALID",
            Self::RevokedByPsu => "REVOKED_BY_PSU",
            Self::Expired => "EXPIRED",
            Self::TerminatedByTpp => "TERMINATED_BY_TPP",
            Self::PartiallyAuthorised => "PARTIALLY_AUTHORISED",
        };
        f.write_str(s)
    }
}

// ─── AIS Consent ─────────────────────────────────────────────────────

/// Accounts (by IBAN) the TPP may access, per access kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAccess {
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub balances: Vec<String>,
    #[serde(default)]
    pub transactions: Vec<String>,
}

impl AccountAccess {
    /// No account named in any access kind (bank-offered or global consent).
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.balances.is_empty() && self.transactions.is_empty()
    }
}

/// Account-information consent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AisConsent {
    pub id: ConsentId,
    pub consent_status: ConsentStatus,
    pub tpp_info: TppInfo,
    pub access: AccountAccess,
    #[serde(default)]
    pub psu_id_data_list: Vec<PsuIdData>,
    #[serde(default)]
    pub authorisations: Vec<Authorisation>,
    #[serde(default)]
    pub multilevel_sca_required: bool,
    pub recurring_indicator: bool,
    pub frequency_per_day: u32,
    /// Last day on which the consent may be used.
    pub valid_until: NaiveDate,
}

impl AisConsent {
    /// Whether `valid_until` lies before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.valid_until < today
    }
}

impl AuthorisationParent for AisConsent {
    fn resource_id(&self) -> &str {
        self.id.as_str()
    }

    fn tpp_info(&self) -> &TppInfo {
        &self.tpp_info
    }

    fn psu_id_data_list(&self) -> &[PsuIdData] {
        &self.psu_id_data_list
    }

    fn authorisations(&self) -> &[Authorisation] {
        &self.authorisations
    }

    fn is_multilevel_sca_required(&self) -> bool {
        self.multilevel_sca_required
    }
}

// ─── PIIS Consent ────────────────────────────────────────────────────

/// Funds-confirmation consent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiisConsent {
    pub id: ConsentId,
    pub consent_status: ConsentStatus,
    pub tpp_info: TppInfo,
    /// IBAN of the account the card is linked to.
    pub account: String,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub psu_id_data_list: Vec<PsuIdData>,
    #[serde(default)]
    pub authorisations: Vec<Authorisation>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

impl PiisConsent {
    /// Whether the consent carries an expiry that lies before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.valid_until.is_some_and(|until| until < today)
    }
}

impl AuthorisationParent for PiisConsent {
    fn resource_id(&self) -> &str {
        self.id.as_str()
    }

    fn tpp_info(&self) -> &TppInfo {
        &self.tpp_info
    }

    fn psu_id_data_list(&self) -> &[PsuIdData] {
        &self.psu_id_data_list
    }

    fn authorisations(&self) -> &[Authorisation] {
        &self.authorisations
    }

    fn is_multilevel_sca_required(&self) -> bool {
        false
    }
}
