//! # TPP URI Domain Compliance
//!
//! Redirect and notification URIs supplied by a TPP should point into a
//! domain secured by its eIDAS QWAC certificate: the certificate CN (when
//! it is a domain name) or one of its SubjectAltName DNS entries. Hosts are
//! compared on their registrable domain (the last two labels),
//! case-insensitively, so `redirect.example.com` is covered by
//! `www.example.com` and by `*.example.com`.
//!
//! A mismatch is advisory: the request proceeds with a `FORMAT_ERROR`
//! warning attached.

use std::sync::Arc;

use xs2a_core::{
    AspspProfileService, MessageErrorCode, ScaApproach, TppInfo, TppMessage,
};

use crate::objects::CreateConsentRequestObject;
use crate::result::ValidationResult;
use crate::validator::BusinessValidator;

// ─── Domain Helpers ──────────────────────────────────────────────────

fn is_domain_shaped(candidate: &str) -> bool {
    let name = candidate.trim_start_matches("*.");
    name.contains('.')
        && name
            .split('.')
            .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

fn registrable_domain(host: &str) -> String {
    let host = host.trim_start_matches("*.").to_ascii_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".")
}

fn host_of(uri: &str) -> &str {
    let without_scheme = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let end = without_scheme
        .find(|c| matches!(c, '/' | '?' | '#' | ':'))
        .unwrap_or(without_scheme.len());
    &without_scheme[..end]
}

/// Domains secured by the TPP certificate: its name when domain-shaped and
/// every domain-shaped DNS entry.
pub fn tpp_domains(tpp: &TppInfo) -> Vec<String> {
    tpp.tpp_name
        .iter()
        .chain(tpp.dns_list.iter())
        .filter(|d| is_domain_shaped(d))
        .map(|d| registrable_domain(d))
        .collect()
}

/// Whether `uri` points into one of `domains` (as returned by
/// [`tpp_domains`]).
pub fn is_uri_compliant(uri: &str, domains: &[String]) -> bool {
    let host = host_of(uri.trim());
    if !is_domain_shaped(host) {
        return false;
    }
    let registrable = registrable_domain(host);
    domains.iter().any(|d| *d == registrable)
}

// ─── Validator ───────────────────────────────────────────────────────

/// Warns when TPP redirect URIs leave the certificate's domains.
pub struct TppDomainValidator {
    profile: Arc<dyn AspspProfileService>,
}

impl TppDomainValidator {
    pub fn new(profile: Arc<dyn AspspProfileService>) -> Self {
        Self { profile }
    }
}

impl std::fmt::Debug for TppDomainValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TppDomainValidator").finish_non_exhaustive()
    }
}

impl BusinessValidator<CreateConsentRequestObject> for TppDomainValidator {
    fn validate(&self, _object: &CreateConsentRequestObject) -> ValidationResult {
        ValidationResult::valid()
    }

    fn build_warning_messages(&self, object: &CreateConsentRequestObject) -> Vec<TppMessage> {
        if !self.profile.is_check_uri_compliance_to_domain_supported()
            || object.sca_approach == ScaApproach::Embedded
        {
            return Vec::new();
        }
        let Some(redirect) = object.tpp_info.tpp_redirect_uri.as_ref() else {
            return Vec::new();
        };
        let uris: Vec<&str> = std::iter::once(redirect.uri.as_str())
            .chain(redirect.nok_uri.as_deref())
            .filter(|u| !u.trim().is_empty())
            .collect();
        if uris.is_empty() {
            return Vec::new();
        }
        let domains = tpp_domains(&object.tpp_info);
        if domains.is_empty() {
            return Vec::new();
        }
        if uris.iter().all(|u| is_uri_compliant(u, &domains)) {
            Vec::new()
        } else {
            tracing::debug!(
                tpp = %object.tpp_info.authorisation_number,
                "redirect URI outside certificate domains"
            );
            vec![TppMessage::warning(MessageErrorCode::FormatErrorInvalidDomain)]
        }
    }
}
