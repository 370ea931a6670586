//! # Payment Snapshot
//!
//! Read-only view of an initiated payment as returned by the CMS. Both
//! initiation and cancellation authorisations live in one list and are
//! told apart by their `AuthorisationType`.

use serde::{Deserialize, Serialize};

use crate::authorisation::{Authorisation, AuthorisationParent};
use crate::identity::PaymentId;
use crate::psu::PsuIdData;
use crate::tpp::TppInfo;

/// Payment service addressed by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Single,
    Periodic,
    Bulk,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Single => "payments",
            Self::Periodic => "periodic-payments",
            Self::Bulk => "bulk-payments",
        };
        f.write_str(s)
    }
}

/// ISO 20022 transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Accepted settlement completed on the creditor side.
    Accc,
    /// Accepted customer profile.
    Accp,
    /// Accepted settlement completed.
    Acsc,
    /// Accepted settlement in process.
    Acsp,
    /// Accepted technical validation.
    Actc,
    /// Accepted with change.
    Acwc,
    /// Accepted without posting.
    Acwp,
    /// Accepted funds checked.
    Acfc,
    /// Received.
    Rcvd,
    /// Pending.
    Pdng,
    /// Rejected.
    Rjct,
    /// Cancelled.
    Canc,
    /// Partially accepted technical correct (multilevel SCA pending).
    Patc,
    /// Partially accepted.
    Part,
}

impl TransactionStatus {
    /// Whether the payment has reached a final status and can no longer be
    /// cancelled.
    pub fn is_finalised(&self) -> bool {
        matches!(self, Self::Accc | Self::Acsc | Self::Rjct | Self::Canc)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Accc => "ACCC",
            Self::Accp => "ACCP",
            Self::Acsc => "ACSC",
            Self::Acsp => "ACSP",
            Self::Actc => "ACTC",
            Self::Acwc => "ACWC",
            Self::Acwp => "ACWP",
            Self::Acfc => "ACFC",
            Self::Rcvd => "RCVD",
            Self::Pdng => "PDNG",
            Self::Rjct => "RJCT",
            Self::Canc => "CANC",
            Self::Patc => "PATC",
            Self::Part => "PART",
        };
        f.write_str(s)
    }
}

/// Payment snapshot common to single, periodic and bulk payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonPayment {
    pub payment_id: PaymentId,
    pub payment_type: PaymentType,
    /// Payment product, e.g. `sepa-credit-transfers`.
    pub payment_product: String,
    pub transaction_status: TransactionStatus,
    pub tpp_info: TppInfo,
    #[serde(default)]
    pub psu_id_data_list: Vec<PsuIdData>,
    #[serde(default)]
    pub authorisations: Vec<Authorisation>,
    #[serde(default)]
    pub multilevel_sca_required: bool,
}

impl AuthorisationParent for CommonPayment {
    fn resource_id(&self) -> &str {
        self.payment_id.as_str()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalised_transaction_statuses() {
        assert!(TransactionStatus::Acsc.is_finalised());
        assert!(TransactionStatus::Canc.is_finalised());
        assert!(!TransactionStatus::Rcvd.is_finalised());
        assert!(!TransactionStatus::Patc.is_finalised());
    }

    #[test]
    fn transaction_status_wire_form() {
        let json = serde_json::to_string(&TransactionStatus::Actc).unwrap();
        assert_eq!(json, "\"ACTC\"");
    }

    #[test]
    fn payment_type_display_is_path_segment() {
        assert_eq!(PaymentType::Periodic.to_string(), "periodic-payments");
    }
}
