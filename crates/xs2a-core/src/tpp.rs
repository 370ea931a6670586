//! # TPP Information
//!
//! What the ASPSP knows about the Third-Party Provider behind a request:
//! the authorisation number and names taken from its eIDAS certificate and
//! the redirect/notification URIs it supplied.

use serde::{Deserialize, Serialize};

/// Redirect URIs supplied by the TPP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TppRedirectUri {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nok_uri: Option<String>,
}

/// TPP identity as extracted from its QWAC certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TppInfo {
    /// National competent authority registration number.
    pub authorisation_number: String,
    /// Certificate CN / organisation name.
    #[serde(default)]
    pub tpp_name: Option<String>,
    /// SubjectAltName DNS entries.
    #[serde(default)]
    pub dns_list: Vec<String>,
    #[serde(default)]
    pub tpp_redirect_uri: Option<TppRedirectUri>,
}

impl TppInfo {
    pub fn new(authorisation_number: impl Into<String>) -> Self {
        Self {
            authorisation_number: authorisation_number.into(),
            ..Self::default()
        }
    }

    /// Whether both describe the same registered TPP.
    pub fn is_same_tpp(&self, other: &TppInfo) -> bool {
        self.authorisation_number == other.authorisation_number
    }
}

/// Notification modes a TPP may request for status callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationSupportedMode {
    /// Notify on every SCA status change.
    Sca,
    /// Notify on every resource status change.
    Process,
    /// Notify on the final status only.
    Last,
    /// No notifications.
    None,
}

impl std::fmt::Display for NotificationSupportedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sca => "SCA",
            Self::Process => "PROCESS",
            Self::Last => "LAST",
            Self::None => "NONE",
        };
        f.write_str(s)
    }
}

/// Notification preferences from the `TPP-Notification-*` headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TppNotificationData {
    #[serde(default)]
    pub notification_modes: Vec<NotificationSupportedMode>,
    #[serde(default)]
    pub tpp_notification_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tpp_compares_authorisation_number() {
        let mut a = TppInfo::new("PSDDE-FAKENCA-123");
        a.tpp_name = Some("Name A".to_string());
        let mut b = TppInfo::new("PSDDE-FAKENCA-123");
        b.tpp_name = Some("Name B".to_string());
        assert!(a.is_same_tpp(&b));
        assert!(!a.is_same_tpp(&TppInfo::new("other")));
    }

    #[test]
    fn notification_mode_wire_form() {
        let modes: Vec<NotificationSupportedMode> =
            serde_json::from_str(r#"["SCA","LAST"]"#).unwrap();
        assert_eq!(modes, vec![NotificationSupportedMode::Sca, NotificationSupportedMode::Last]);
    }
}
