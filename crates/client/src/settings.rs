//! Per-merchant carrier settings.
//!
//! The carrier issues two credential sets per contract: a "sender" pair
//! for handing over shipments on the legacy service and a "query" triple
//! (username, password, customer code) for the lookup services. The
//! embedding app stores these per shop and passes them into every call;
//! the client never persists them.
//!
//! # Environment Variables (CLI / tests)
//!
//! - `ARAS_SENDER_USERNAME` / `ARAS_SENDER_PASSWORD`
//! - `ARAS_QUERY_USERNAME` / `ARAS_QUERY_PASSWORD` / `ARAS_QUERY_CUSTOMER_CODE`
//! - `ARAS_ADDRESS_ID_MODE` - `Aktif` or `Pasif` (default: `Aktif`)

use secrecy::{ExposeSecret, SecretString};

use crate::error::ArasError;

/// Whether submissions carry the supplier's carrier branch id.
///
/// `Active` sends the supplier's branch id as `SenderAccountAddressId`;
/// `Passive` sends the element empty so the carrier applies the account's
/// default branch binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressIdMode {
    #[default]
    Active,
    Passive,
}

impl AddressIdMode {
    /// Parse the stored setting value. The settings UI persists the
    /// Turkish labels `Aktif` / `Pasif`; anything unrecognized falls back
    /// to `Active`, which is what the carrier panel integration always did.
    #[must_use]
    pub fn from_setting(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("pasif") {
            Self::Passive
        } else {
            Self::Active
        }
    }
}

/// Carrier credentials and submission options for one merchant.
///
/// Implements `Debug` manually to redact both passwords.
#[derive(Clone)]
pub struct ArasSettings {
    /// Username for the legacy cargo service (shipment submission).
    pub sender_username: String,
    /// Password for the legacy cargo service.
    pub sender_password: SecretString,
    /// Username for the lookup services (tracking, label, status).
    pub query_username: String,
    /// Password for the lookup services.
    pub query_password: SecretString,
    /// Customer code sent alongside the query credentials.
    pub query_customer_code: String,
    /// Branch-id routing mode for submissions.
    pub address_id_mode: AddressIdMode,
}

impl std::fmt::Debug for ArasSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArasSettings")
            .field("sender_username", &self.sender_username)
            .field("sender_password", &"[REDACTED]")
            .field("query_username", &self.query_username)
            .field("query_password", &"[REDACTED]")
            .field("query_customer_code", &self.query_customer_code)
            .field("address_id_mode", &self.address_id_mode)
            .finish()
    }
}

impl ArasSettings {
    /// Load settings from environment variables.
    ///
    /// Missing variables become empty strings; the per-operation
    /// validation reports them when an operation actually needs them,
    /// mirroring how a half-filled settings form behaves in the app.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            sender_username: env_or_empty("ARAS_SENDER_USERNAME"),
            sender_password: SecretString::from(env_or_empty("ARAS_SENDER_PASSWORD")),
            query_username: env_or_empty("ARAS_QUERY_USERNAME"),
            query_password: SecretString::from(env_or_empty("ARAS_QUERY_PASSWORD")),
            query_customer_code: env_or_empty("ARAS_QUERY_CUSTOMER_CODE"),
            address_id_mode: AddressIdMode::from_setting(&env_or_empty("ARAS_ADDRESS_ID_MODE")),
        }
    }

    /// Check that the sender credential pair is present.
    ///
    /// # Errors
    ///
    /// Returns [`ArasError::MissingSenderCredentials`] if the username or
    /// password is empty.
    pub fn validate_for_submission(&self) -> Result<(), ArasError> {
        if self.sender_username.trim().is_empty()
            || self.sender_password.expose_secret().trim().is_empty()
        {
            return Err(ArasError::MissingSenderCredentials);
        }
        Ok(())
    }

    /// Check that the query credential triple is present.
    ///
    /// # Errors
    ///
    /// Returns [`ArasError::MissingQueryCredentials`] if the username,
    /// password, or customer code is empty.
    pub fn validate_for_query(&self) -> Result<(), ArasError> {
        if self.query_username.trim().is_empty()
            || self.query_password.expose_secret().trim().is_empty()
            || self.query_customer_code.trim().is_empty()
        {
            return Err(ArasError::MissingQueryCredentials);
        }
        Ok(())
    }

    /// Check that the query username/password pair is present.
    ///
    /// The barcode call authenticates with the pair alone and never sends
    /// the customer code, so an account configured without one can still
    /// fetch labels.
    ///
    /// # Errors
    ///
    /// Returns [`ArasError::MissingQueryCredentials`] if the username or
    /// password is empty.
    pub fn validate_for_label(&self) -> Result<(), ArasError> {
        if self.query_username.trim().is_empty()
            || self.query_password.expose_secret().trim().is_empty()
        {
            return Err(ArasError::MissingQueryCredentials);
        }
        Ok(())
    }
}

fn env_or_empty(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Fully-populated settings for tests across the crate.
    pub(crate) fn test_settings() -> ArasSettings {
        ArasSettings {
            sender_username: "sender-user".to_owned(),
            sender_password: SecretString::from("sender-pass"),
            query_username: "query-user".to_owned(),
            query_password: SecretString::from("query-pass"),
            query_customer_code: "123456".to_owned(),
            address_id_mode: AddressIdMode::Active,
        }
    }

    #[test]
    fn test_validate_for_submission_requires_sender_pair() {
        let mut settings = test_settings();
        assert!(settings.validate_for_submission().is_ok());

        settings.sender_password = SecretString::from("");
        assert!(matches!(
            settings.validate_for_submission(),
            Err(ArasError::MissingSenderCredentials)
        ));
    }

    #[test]
    fn test_validate_for_query_requires_customer_code() {
        let mut settings = test_settings();
        assert!(settings.validate_for_query().is_ok());

        settings.query_customer_code = "   ".to_owned();
        assert!(matches!(
            settings.validate_for_query(),
            Err(ArasError::MissingQueryCredentials)
        ));
    }

    #[test]
    fn test_validate_for_label_accepts_missing_customer_code() {
        let mut settings = test_settings();
        settings.query_customer_code = String::new();
        assert!(settings.validate_for_label().is_ok());

        settings.query_password = SecretString::from("");
        assert!(matches!(
            settings.validate_for_label(),
            Err(ArasError::MissingQueryCredentials)
        ));
    }

    #[test]
    fn test_address_id_mode_from_setting() {
        assert_eq!(AddressIdMode::from_setting("Pasif"), AddressIdMode::Passive);
        assert_eq!(AddressIdMode::from_setting("pasif"), AddressIdMode::Passive);
        assert_eq!(AddressIdMode::from_setting("Aktif"), AddressIdMode::Active);
        assert_eq!(AddressIdMode::from_setting(""), AddressIdMode::Active);
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let settings = test_settings();
        let debug_output = format!("{settings:?}");

        assert!(debug_output.contains("sender-user"));
        assert!(debug_output.contains("123456"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sender-pass"));
        assert!(!debug_output.contains("query-pass"));
    }
}
