//! Tracking number resolution.
//!
//! The carrier never pushes tracking numbers; they have to be pulled, and
//! no single query operation answers for every account configuration. The
//! client therefore runs a fixed cascade over both services, newest query
//! surface first, and stops at the first real answer. A value equal to the
//! integration code itself is the carrier echoing the query back before
//! pickup and counts as no answer.

use aras_kargo_core::IntegrationCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::client::ArasClient;
use crate::config::{ArasEndpoints, FieldAliases};
use crate::response::{element_text, first_text_by_priority, scan_leaves};
use crate::settings::ArasSettings;
use crate::soap::{
    SOAP11_CONTENT_TYPE, TEMPURI_NS, XmlWriter, soap11_envelope, wcf_envelope, wcf_login_blob,
    wcf_query_blob,
};

/// One operation of the tracking cascade.
///
/// Every operation has the same contract: build a request, send it, parse
/// the response into an [`AttemptOutcome`]. The dispatcher in
/// [`ArasClient::resolve_tracking`] owns iteration, echo detection, and
/// the failure transcript; the operations stay order-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingOp {
    /// WCF `GetQueryDS` (query type 1): dataset XML nested inside the
    /// result element.
    QueryDataset,
    /// WCF `GetQueryJSON` (query type 100): JSON document nested inside
    /// the result element.
    QueryJson,
    /// Legacy `GetOrder`: plain XML `<Order>` record.
    LegacyOrder,
    /// Legacy `GetBarcode` used as a probe: some accounts get the
    /// tracking number in the barcode response metadata.
    BarcodeProbe,
    /// Legacy `GetCargoInfo`: direct fields first, then the leaf scan.
    CargoInfo,
}

/// Cascade order. First real answer wins; later operations are not called.
pub const TRACKING_CASCADE: [TrackingOp; 5] = [
    TrackingOp::QueryDataset,
    TrackingOp::QueryJson,
    TrackingOp::LegacyOrder,
    TrackingOp::BarcodeProbe,
    TrackingOp::CargoInfo,
];

/// What one cascade attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttemptOutcome {
    /// A candidate tracking number (echo not yet filtered).
    Found(String),
    /// Nothing usable; the cascade continues.
    NoAnswer,
    /// The carrier explicitly rejected the query; the cascade stops.
    Rejected { message: String },
}

impl TrackingOp {
    /// Carrier operation name, used in logs and transcript labels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::QueryDataset => "GetQueryDS",
            Self::QueryJson => "GetQueryJSON",
            Self::LegacyOrder => "GetOrder",
            Self::BarcodeProbe => "GetBarcode",
            Self::CargoInfo => "GetCargoInfo",
        }
    }

    const fn soap_action(self) -> &'static str {
        match self {
            Self::QueryDataset => "http://tempuri.org/IArasCargoIntegrationService/GetQueryDS",
            Self::QueryJson => "http://tempuri.org/IArasCargoIntegrationService/GetQueryJSON",
            Self::LegacyOrder => "http://tempuri.org/GetOrder",
            Self::BarcodeProbe => "http://tempuri.org/GetBarcode",
            Self::CargoInfo => "http://tempuri.org/GetCargoInfo",
        }
    }

    fn endpoint_url(self, endpoints: &ArasEndpoints) -> &str {
        match self {
            Self::QueryDataset | Self::QueryJson => &endpoints.integration_service_url,
            Self::LegacyOrder | Self::BarcodeProbe | Self::CargoInfo => {
                &endpoints.cargo_service_url
            }
        }
    }

    fn build_envelope(self, settings: &ArasSettings, code: &IntegrationCode) -> String {
        match self {
            Self::QueryDataset => wcf_envelope(
                "GetQueryDS",
                &wcf_login_blob(settings),
                &wcf_query_blob("1", "IntegrationCode", code.as_str()),
            ),
            Self::QueryJson => wcf_envelope(
                "GetQueryJSON",
                &wcf_login_blob(settings),
                &wcf_query_blob("100", "IntegrationCode", code.as_str()),
            ),
            Self::LegacyOrder | Self::BarcodeProbe | Self::CargoInfo => {
                soap11_envelope(&legacy_lookup_body(self.label(), settings, code))
            }
        }
    }

    fn parse(self, aliases: &FieldAliases, raw: &str) -> AttemptOutcome {
        match self {
            Self::QueryDataset => parse_dataset(aliases, raw),
            Self::QueryJson => parse_json(aliases, raw),
            Self::LegacyOrder => parse_tagged(&aliases.order_tracking_tags, raw),
            Self::BarcodeProbe => parse_tagged(&aliases.barcode_probe_tags, raw),
            Self::CargoInfo => parse_cargo_info(aliases, raw),
        }
    }
}

/// Result of a tracking resolution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    /// Operator-facing Turkish message.
    pub message: String,
    /// Raw carrier response on success or rejection; on exhaustion, the
    /// labeled transcript of every attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl TrackingOutcome {
    fn failure(message: String, raw_response: Option<String>) -> Self {
        Self {
            success: false,
            tracking_number: None,
            message,
            raw_response,
        }
    }
}

impl ArasClient {
    /// Resolve the carrier tracking number for an integration code.
    ///
    /// Runs the cascade in [`TRACKING_CASCADE`] order, sequentially. A
    /// transport failure on one operation does not stop the cascade (the
    /// two services fail independently); an explicit carrier rejection
    /// does. When every operation comes back empty or echoing, the
    /// outcome carries the concatenated transcript of all attempts so
    /// operators can see exactly what the carrier said.
    #[instrument(skip(self, settings), fields(code = %code))]
    pub async fn resolve_tracking(
        &self,
        settings: &ArasSettings,
        code: &IntegrationCode,
    ) -> TrackingOutcome {
        if let Err(err) = settings.validate_for_query() {
            warn!(error = %err, "tracking blocked by settings");
            return TrackingOutcome::failure(err.operator_message(), None);
        }

        let mut transcript = String::new();

        for op in TRACKING_CASCADE {
            let envelope = op.build_envelope(settings, code);
            let url = op.endpoint_url(&self.config().endpoints);

            let raw = match self
                .post_soap(url, SOAP11_CONTENT_TYPE, Some(op.soap_action()), envelope)
                .await
            {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(op = op.label(), error = %err, "attempt could not reach the carrier");
                    push_transcript(&mut transcript, op, &format!("[transport] {err}"));
                    continue;
                }
            };

            match op.parse(&self.config().aliases, &raw) {
                AttemptOutcome::Found(number) if number == code.as_str() => {
                    debug!(op = op.label(), "carrier echoed the integration code");
                    push_transcript(&mut transcript, op, &raw);
                }
                AttemptOutcome::Found(number) => {
                    info!(op = op.label(), tracking = %number, "tracking number resolved");
                    return TrackingOutcome {
                        success: true,
                        tracking_number: Some(number),
                        message: format!("{} başarılı", op.label()),
                        raw_response: Some(raw),
                    };
                }
                AttemptOutcome::Rejected { message } => {
                    error!(op = op.label(), %message, "carrier rejected the query");
                    return TrackingOutcome::failure(message, Some(raw));
                }
                AttemptOutcome::NoAnswer => {
                    debug!(op = op.label(), "no tracking number in response");
                    push_transcript(&mut transcript, op, &raw);
                }
            }
        }

        TrackingOutcome::failure(
            "Takip numarası bulunamadı (tüm sorgulama yöntemleri denendi).".to_owned(),
            Some(transcript),
        )
    }
}

fn push_transcript(transcript: &mut String, op: TrackingOp, body: &str) {
    transcript.push_str("--- ");
    transcript.push_str(op.label());
    transcript.push_str(" ---\n");
    transcript.push_str(body);
    transcript.push_str("\n\n");
}

/// Body for the legacy lookups: operation element with the query
/// credentials and the integration code.
fn legacy_lookup_body(operation: &str, settings: &ArasSettings, code: &IntegrationCode) -> String {
    let mut xml = XmlWriter::new();
    xml.open_ns(operation, TEMPURI_NS);
    xml.leaf("userName", &settings.query_username);
    xml.leaf("password", settings.query_password.expose_secret());
    xml.leaf("integrationCode", code.as_str());
    xml.close(operation);
    xml.finish()
}

/// Dataset query: the result element's text is a second XML document.
fn parse_dataset(aliases: &FieldAliases, raw: &str) -> AttemptOutcome {
    let Ok(doc) = roxmltree::Document::parse(raw) else {
        return AttemptOutcome::NoAnswer;
    };
    let Some(inner) = element_text(&doc, "GetQueryDSResult") else {
        return AttemptOutcome::NoAnswer;
    };
    let Ok(inner_doc) = roxmltree::Document::parse(&inner) else {
        return AttemptOutcome::NoAnswer;
    };
    first_text_by_priority(&inner_doc, &aliases.dataset_tracking_tags)
        .map_or(AttemptOutcome::NoAnswer, AttemptOutcome::Found)
}

/// JSON query: the result element's text is a JSON array or object. Keys
/// are matched by upper-cased substring because the carrier mixes Turkish
/// and ASCII spellings across revisions.
fn parse_json(aliases: &FieldAliases, raw: &str) -> AttemptOutcome {
    let Ok(doc) = roxmltree::Document::parse(raw) else {
        return AttemptOutcome::NoAnswer;
    };
    let Some(payload) = element_text(&doc, "GetQueryJSONResult") else {
        return AttemptOutcome::NoAnswer;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&payload) else {
        return AttemptOutcome::NoAnswer;
    };

    let record = match &value {
        serde_json::Value::Array(items) => items.first(),
        serde_json::Value::Object(_) => Some(&value),
        _ => None,
    };

    if let Some(object) = record.and_then(serde_json::Value::as_object) {
        for (key, field) in object {
            let upper = key.to_uppercase();
            let aliased = aliases
                .json_tracking_fragments
                .iter()
                .any(|fragment| upper.contains(&fragment.to_uppercase()));
            if aliased && let Some(text) = value_as_text(field) {
                return AttemptOutcome::Found(text);
            }
        }
    }

    if let Some(object) = value.as_object()
        && let Some(result_code) = object.get("ResultCode").and_then(value_as_text)
        && result_code != "0"
    {
        let message = object
            .get("Message")
            .and_then(value_as_text)
            .unwrap_or_else(|| "Servis hatası".to_owned());
        return AttemptOutcome::Rejected { message };
    }

    AttemptOutcome::NoAnswer
}

/// Plain XML lookups: explicit alias tags in priority order.
fn parse_tagged(tags: &[String], raw: &str) -> AttemptOutcome {
    let Ok(doc) = roxmltree::Document::parse(raw) else {
        return AttemptOutcome::NoAnswer;
    };
    first_text_by_priority(&doc, tags).map_or(AttemptOutcome::NoAnswer, AttemptOutcome::Found)
}

/// Generic info query: explicit tags first, then the substring leaf scan.
/// Leaf-scan hits are logged so alias drift shows up in the logs before
/// it becomes a support ticket.
fn parse_cargo_info(aliases: &FieldAliases, raw: &str) -> AttemptOutcome {
    let Ok(doc) = roxmltree::Document::parse(raw) else {
        return AttemptOutcome::NoAnswer;
    };
    if let Some(found) = first_text_by_priority(&doc, &aliases.order_tracking_tags) {
        return AttemptOutcome::Found(found);
    }
    if let Some((tag, value)) = scan_leaves(&doc, &aliases.generic_leaf_fragments) {
        info!(%tag, "tracking number recovered by leaf-scan fallback");
        return AttemptOutcome::Found(value);
    }
    AttemptOutcome::NoAnswer
}

fn value_as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
