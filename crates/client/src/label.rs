//! Shipping label retrieval.
//!
//! `GetBarcode` on the legacy service returns the printable label as a
//! base64 blob (the carrier ships a ZIP of ZPL/PDF files inside it). The
//! blob is passed through untouched; [`LabelOutcome::decode`] is for
//! callers that want the bytes.

use aras_kargo_core::IntegrationCode;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::client::ArasClient;
use crate::error::ArasError;
use crate::response::first_text_by_priority;
use crate::settings::ArasSettings;
use crate::soap::{SOAP11_CONTENT_TYPE, TEMPURI_NS, XmlWriter, soap11_envelope};

const GET_BARCODE_ACTION: &str = "http://tempuri.org/GetBarcode";

/// Result of a label fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOutcome {
    pub success: bool,
    /// Base64 label payload, exactly as the carrier sent it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_base64: Option<String>,
    /// Operator-facing Turkish message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl LabelOutcome {
    fn failure(message: impl Into<String>, raw_response: Option<String>) -> Self {
        Self {
            success: false,
            label_base64: None,
            message: message.into(),
            raw_response,
        }
    }

    /// Decode the base64 payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArasError::Parse`] when there is no payload or the
    /// carrier sent something that is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ArasError> {
        let Some(encoded) = &self.label_base64 else {
            return Err(ArasError::Parse("no label payload to decode".to_owned()));
        };
        BASE64
            .decode(encoded.trim())
            .map_err(|err| ArasError::Parse(format!("label payload is not valid base64: {err}")))
    }
}

impl ArasClient {
    /// Fetch the printable shipping label for an integration code.
    ///
    /// `GetBarcode` authenticates with the query username/password pair,
    /// not the sender pair; the customer code is not required here. The
    /// operation never errors; failures come back as an unsuccessful
    /// [`LabelOutcome`] with the carrier's response attached whenever one
    /// was received.
    #[instrument(skip(self, settings), fields(code = %code))]
    pub async fn fetch_label(
        &self,
        settings: &ArasSettings,
        code: &IntegrationCode,
    ) -> LabelOutcome {
        if settings.validate_for_label().is_err() {
            warn!("label fetch blocked by settings");
            return LabelOutcome::failure("Ayarlar eksik.", None);
        }

        let envelope = soap11_envelope(&barcode_request_body(settings, code));
        let url = &self.config().endpoints.cargo_service_url;

        let raw = match self
            .post_soap(url, SOAP11_CONTENT_TYPE, Some(GET_BARCODE_ACTION), envelope)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "label request could not reach the carrier");
                return LabelOutcome::failure("Barkod servisi hatası", None);
            }
        };

        match extract_label_payload(&raw) {
            Some(payload) => {
                info!(bytes = payload.len(), "label payload received");
                LabelOutcome {
                    success: true,
                    label_base64: Some(payload),
                    message: "Barkod alındı".to_owned(),
                    raw_response: Some(raw),
                }
            }
            None => {
                warn!("label response carried no payload");
                LabelOutcome::failure(
                    "Barkod oluşturulamadı veya servisten boş döndü.",
                    Some(raw),
                )
            }
        }
    }
}

fn barcode_request_body(settings: &ArasSettings, code: &IntegrationCode) -> String {
    let mut xml = XmlWriter::new();
    xml.open_ns("GetBarcode", TEMPURI_NS);
    xml.leaf("userName", &settings.query_username);
    xml.leaf("password", settings.query_password.expose_secret());
    xml.leaf("integrationCode", code.as_str());
    xml.close("GetBarcode");
    xml.finish()
}

/// `GetBarcodeResult` first, then the bare `Barcode` element some service
/// revisions use instead.
fn extract_label_payload(raw: &str) -> Option<String> {
    let doc = roxmltree::Document::parse(raw).ok()?;
    let tags = ["GetBarcodeResult".to_owned(), "Barcode".to_owned()];
    first_text_by_priority(&doc, &tags)
}
