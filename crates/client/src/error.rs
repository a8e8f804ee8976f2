//! Carrier client errors.
//!
//! Public operations never surface these directly - each operation folds
//! them into its outcome struct, using [`ArasError::operator_message`] for
//! the Turkish text shown to store operators.

use aras_kargo_core::IntegrationCodeError;
use thiserror::Error;

/// Errors that can occur when talking to the carrier.
#[derive(Debug, Error)]
pub enum ArasError {
    /// Sender credentials (username/password) are not configured.
    #[error("sender credentials are not configured")]
    MissingSenderCredentials,

    /// Query credentials (username/password/customer code) are not configured.
    #[error("query credentials are not configured")]
    MissingQueryCredentials,

    /// The shipping address has no usable province after normalization.
    #[error("shipping address has no usable province")]
    MissingProvince,

    /// A generated or supplied integration code failed validation.
    #[error("invalid integration code: {0}")]
    InvalidCode(#[from] IntegrationCodeError),

    /// The HTTP request failed (connect, TLS, timeout).
    #[error("carrier request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The carrier answered with a business-level rejection.
    #[error("carrier rejected the request (code {code}): {message}")]
    Upstream {
        /// Carrier result code, `"?"` when the response carried none.
        code: String,
        /// Carrier-provided message.
        message: String,
    },

    /// The carrier's response could not be interpreted.
    #[error("carrier response could not be parsed: {0}")]
    Parse(String),
}

impl ArasError {
    /// The Turkish message shown to the store operator for this error.
    ///
    /// These strings are stable: the embedding app displays them verbatim
    /// and operators know them from the carrier's own panel wording.
    #[must_use]
    pub fn operator_message(&self) -> String {
        match self {
            Self::MissingSenderCredentials => {
                "Aras Kargo ayarları eksik. Lütfen Ayarlar sayfasından yapılandırın.".to_owned()
            }
            Self::MissingQueryCredentials => {
                "Ayarlar eksik (Kullanıcı Adı, Şifre veya Müşteri Kodu eksik).".to_owned()
            }
            Self::MissingProvince => {
                "Kargo gönderimi başarısız: 'İl' (Province) bilgisi eksik. \
                 Lütfen Shopify siparişinde adresi düzenleyin."
                    .to_owned()
            }
            Self::InvalidCode(_) => "Sistem hatası".to_owned(),
            Self::Transport(source) => format!("Servis hatası: {source}"),
            Self::Upstream { code, message } => {
                format!("Aras Kargo Hatası (Kod: {code}): {message}")
            }
            Self::Parse(_) => "Bilinmeyen yanıt formatı.".to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_operator_message_carries_code_and_text() {
        let err = ArasError::Upstream {
            code: "860".to_owned(),
            message: "Mükerrer kayıt".to_owned(),
        };
        assert_eq!(
            err.operator_message(),
            "Aras Kargo Hatası (Kod: 860): Mükerrer kayıt"
        );
    }

    #[test]
    fn test_missing_sender_credentials_message() {
        assert_eq!(
            ArasError::MissingSenderCredentials.operator_message(),
            "Aras Kargo ayarları eksik. Lütfen Ayarlar sayfasından yapılandırın."
        );
    }

    #[test]
    fn test_missing_province_mentions_the_field() {
        let msg = ArasError::MissingProvince.operator_message();
        assert!(msg.contains("'İl' (Province)"));
    }
}
