//! # Authorisation Record
//!
//! Snapshot of an SCA authorisation sub-resource as held by the CMS.
//! The engine reads these and requests status updates; it never creates
//! or stores them itself.

use serde::{Deserialize, Serialize};

use crate::error::ServiceType;
use crate::identity::AuthorisationId;
use crate::psu::PsuIdData;
use crate::sca::{ScaApproach, ScaStatus};

/// What an authorisation authorises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorisationType {
    /// Account-information consent.
    Ais,
    /// Payment initiation.
    Pis,
    /// Cancellation of an initiated payment.
    PisCancellation,
    /// Funds-confirmation consent.
    Piis,
}

impl AuthorisationType {
    /// Service domain used to tag errors. Cancellation reports as PIS.
    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::Ais => ServiceType::Ais,
            Self::Pis | Self::PisCancellation => ServiceType::Pis,
            Self::Piis => ServiceType::Piis,
        }
    }
}

impl std::fmt::Display for AuthorisationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ais => "AIS",
            Self::Pis => "PIS",
            Self::PisCancellation => "PIS_CANCELLATION",
            Self::Piis => "PIIS",
        };
        f.write_str(s)
    }
}

/// An SCA authorisation of a consent or payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorisation {
    pub authorisation_id: AuthorisationId,
    /// Id of the owning consent or payment.
    pub parent_id: String,
    pub authorisation_type: AuthorisationType,
    pub chosen_sca_approach: ScaApproach,
    pub sca_status: ScaStatus,
    #[serde(default)]
    pub psu_id_data: Option<PsuIdData>,
}

impl Authorisation {
    /// A freshly created authorisation in `RECEIVED`.
    pub fn new(
        authorisation_id: AuthorisationId,
        parent_id: impl Into<String>,
        authorisation_type: AuthorisationType,
        chosen_sca_approach: ScaApproach,
    ) -> Self {
        Self {
            authorisation_id,
            parent_id: parent_id.into(),
            authorisation_type,
            chosen_sca_approach,
            sca_status: ScaStatus::Received,
            psu_id_data: None,
        }
    }

    /// Attach the PSU that started the authorisation.
    pub fn with_psu(mut self, psu: PsuIdData) -> Self {
        self.psu_id_data = Some(psu);
        self
    }

    /// Set the current status.
    pub fn with_status(mut self, status: ScaStatus) -> Self {
        self.sca_status = status;
        self
    }

    /// Whether this authorisation was started by `psu`.
    pub fn is_for_psu(&self, psu: &PsuIdData) -> bool {
        self.psu_id_data
            .as_ref()
            .is_some_and(|own| own.content_equals(psu))
    }
}

// ─── Authorisation Parent ────────────────────────────────────────────

/// A consent or payment that owns authorisations.
///
/// Shared validation checks are written against this trait so that the
/// same rule serves AIS, PIIS and PIS resources.
pub trait AuthorisationParent {
    /// Id of the resource as used in `Authorisation::parent_id`.
    fn resource_id(&self) -> &str;

    /// TPP that created the resource.
    fn tpp_info(&self) -> &crate::tpp::TppInfo;

    /// PSUs known to the resource, in the order they were added.
    fn psu_id_data_list(&self) -> &[PsuIdData];

    /// All authorisations of the resource, of every type.
    fn authorisations(&self) -> &[Authorisation];

    /// Whether more than one PSU must authorise.
    fn is_multilevel_sca_required(&self) -> bool;

    /// Look up an authorisation of the given type by id.
    fn find_authorisation(
        &self,
        authorisation_id: &AuthorisationId,
        authorisation_type: AuthorisationType,
    ) -> Option<&Authorisation> {
        self.authorisations().iter().find(|a| {
            &a.authorisation_id == authorisation_id && a.authorisation_type == authorisation_type
        })
    }

    /// First PSU known to the resource.
    fn first_psu(&self) -> Option<&PsuIdData> {
        self.psu_id_data_list().first()
    }

    /// PSU to act for: the request PSU when present or when the resource is
    /// multilevel, otherwise the first PSU of the resource.
    fn actual_psu(&self, request_psu: &PsuIdData) -> Option<PsuIdData> {
        if request_psu.is_not_empty() || self.is_multilevel_sca_required() {
            Some(request_psu.clone())
        } else {
            self.first_psu().cloned()
        }
    }
}
