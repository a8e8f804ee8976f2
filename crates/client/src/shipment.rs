//! Shipment submission (`SetOrder`).

use aras_kargo_core::{IntegrationCode, ShipmentRequest};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::address::{NormalizedAddress, normalize};
use crate::client::ArasClient;
use crate::code::generate_integration_code;
use crate::error::ArasError;
use crate::response::element_text;
use crate::settings::{AddressIdMode, ArasSettings};
use crate::soap::{SOAP12_CONTENT_TYPE, TEMPURI_NS, XmlWriter, soap12_envelope};

/// Result of a shipment submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub success: bool,
    /// The generated MÖK, present on success. Callers persist it; every
    /// later tracking, label, and status call keys on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_code: Option<IntegrationCode>,
    /// Operator-facing Turkish message.
    pub message: String,
    /// Raw carrier response body, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl SubmissionOutcome {
    fn failure(err: &ArasError, raw_response: Option<String>) -> Self {
        Self {
            success: false,
            integration_code: None,
            message: err.operator_message(),
            raw_response,
        }
    }
}

impl ArasClient {
    /// Hand one shipment to the carrier.
    ///
    /// Validation failures (missing credentials, unrecoverable address)
    /// return a failed outcome without any network call.
    #[instrument(skip(self, settings, request), fields(order = %request.order_number, supplier = %request.supplier.code))]
    pub async fn submit_shipment(
        &self,
        settings: &ArasSettings,
        request: &ShipmentRequest,
    ) -> SubmissionOutcome {
        if let Err(err) = settings.validate_for_submission() {
            warn!(error = %err, "submission blocked by settings");
            return SubmissionOutcome::failure(&err, None);
        }

        let normalized = match normalize(&request.address) {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!(error = %err, "submission blocked by address");
                return SubmissionOutcome::failure(&err, None);
            }
        };

        let code = match generate_integration_code(
            &request.order_number,
            &request.supplier.code,
            request.effective_piece_count(),
        ) {
            Ok(code) => code,
            Err(err) => {
                error!(error = %err, "integration code generation failed");
                return SubmissionOutcome::failure(&err, None);
            }
        };

        let body = build_set_order_body(settings, request, &normalized, &code);
        let envelope = soap12_envelope(&body);

        let url = &self.config().endpoints.cargo_service_url;
        let raw = match self
            .post_soap(url, SOAP12_CONTENT_TYPE, None, envelope)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "submission request failed");
                return SubmissionOutcome::failure(&err, None);
            }
        };

        match parse_set_order_response(&raw) {
            Ok(()) => {
                info!(code = %code, "carrier accepted shipment");
                SubmissionOutcome {
                    success: true,
                    message: format!("Aras Kargo alımı başarılı. MÖK: {code}"),
                    integration_code: Some(code),
                    raw_response: Some(raw),
                }
            }
            Err(err) => {
                error!(error = %err, "carrier rejected shipment");
                SubmissionOutcome::failure(&err, Some(raw))
            }
        }
    }
}

/// Build the `<SetOrder>` body. Field order follows the carrier's schema;
/// the COD and service-type fields are fixed because the app only ships
/// prepaid standard parcels.
fn build_set_order_body(
    settings: &ArasSettings,
    request: &ShipmentRequest,
    address: &NormalizedAddress,
    code: &IntegrationCode,
) -> String {
    let piece_count = request.effective_piece_count();
    let content_summary = request.content_summary();

    let mut xml = XmlWriter::new();
    xml.open_ns("SetOrder", TEMPURI_NS);
    xml.open("orderInfo");
    xml.open("Order");
    xml.leaf("IntegrationCode", code.as_str());
    xml.leaf("ReceiverName", &request.address.receiver_name());
    xml.leaf("ReceiverAddress", &request.address.street_address());
    xml.leaf("ReceiverPhone1", &request.address.phone);
    xml.leaf("ReceiverCityName", &address.province);
    xml.leaf("ReceiverTownName", &address.district);
    let branch_id = match settings.address_id_mode {
        AddressIdMode::Active => request.supplier.carrier_branch_id.as_str(),
        AddressIdMode::Passive => "",
    };
    xml.leaf("SenderAccountAddressId", branch_id);
    xml.leaf("PieceCount", &piece_count.to_string());
    xml.open("PieceDetails");
    for index in 1..=piece_count {
        xml.open("PieceDetail");
        xml.leaf("VolumetricWeight", "1");
        xml.leaf("Weight", "1");
        xml.leaf("BarcodeNumber", &code.piece_barcode(index, piece_count));
        xml.leaf("Description", &content_summary);
        xml.close("PieceDetail");
    }
    xml.close("PieceDetails");
    xml.leaf("Content", &request.content_description());
    xml.leaf("WaybillNo", "");
    xml.leaf("InvoiceNo", &request.invoice_number());
    xml.leaf("CodAmount", "0");
    xml.leaf("CodCollectionType", "0");
    xml.leaf("CodCostType", "0");
    xml.leaf("IsCod", "0");
    xml.leaf("PayorTypeCode", "1");
    xml.leaf("IsWorldWide", "0");
    xml.leaf("ServiceType", "0");
    xml.leaf("PackagingType", "1");
    xml.close("Order");
    xml.close("orderInfo");
    xml.leaf("userName", &settings.sender_username);
    xml.leaf("password", settings.sender_password.expose_secret());
    xml.close("SetOrder");
    xml.finish()
}

/// Interpret the `SetOrder` response. `ResultCode` `0` means accepted;
/// anything else, including an unparseable body, is a rejection.
fn parse_set_order_response(raw: &str) -> Result<(), ArasError> {
    let Ok(doc) = roxmltree::Document::parse(raw) else {
        return Err(unknown_response_format());
    };

    let Some(code) = element_text(&doc, "ResultCode") else {
        return Err(unknown_response_format());
    };

    if code == "0" {
        return Ok(());
    }

    let message = element_text(&doc, "ResultMessage")
        .unwrap_or_else(|| "Bilinmeyen yanıt formatı.".to_owned());
    Err(ArasError::Upstream { code, message })
}

fn unknown_response_format() -> ArasError {
    ArasError::Upstream {
        code: "?".to_owned(),
        message: "Bilinmeyen yanıt formatı.".to_owned(),
    }
}
