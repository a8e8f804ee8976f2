//! Delivery status query and classification.
//!
//! The classifier is deliberately lenient: carrier status payloads vary by
//! service revision (key spelling, code vs. prose, date-only responses),
//! so delivery is recognized by three independent signals checked in
//! order. Any record at all that is not delivered means the shipment is
//! moving; `Unknown` is reserved for genuinely empty answers.

use aras_kargo_core::DeliveryStatus;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::client::ArasClient;
use crate::config::FieldAliases;
use crate::response::element_text;
use crate::settings::ArasSettings;
use crate::soap::{SOAP11_CONTENT_TYPE, wcf_envelope, wcf_login_blob, wcf_query_blob};

const GET_QUERY_JSON_ACTION: &str =
    "http://tempuri.org/IArasCargoIntegrationService/GetQueryJSON";

/// Result of a delivery status query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutcome {
    pub success: bool,
    pub status: DeliveryStatus,
    /// Operator-facing Turkish message.
    pub message: String,
    /// The JSON payload the classification was based on, when one was
    /// extracted; otherwise the raw carrier response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl StatusOutcome {
    fn failure(message: impl Into<String>, raw_response: Option<String>) -> Self {
        Self {
            success: false,
            status: DeliveryStatus::Unknown,
            message: message.into(),
            raw_response,
        }
    }
}

/// A classified status payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClassification {
    pub status: DeliveryStatus,
    /// Turkish message naming the signal that decided the classification.
    pub message: String,
}

impl ArasClient {
    /// Query the carrier for the delivery status of a tracking number.
    ///
    /// Uses the WCF JSON query with query type 2, then classifies the
    /// payload with [`classify`]. Never errors; `success` is false when
    /// the status could not be determined.
    #[instrument(skip(self, settings), fields(tracking = %tracking_number))]
    pub async fn query_delivery_status(
        &self,
        settings: &ArasSettings,
        tracking_number: &str,
    ) -> StatusOutcome {
        if settings.validate_for_query().is_err() {
            warn!("status query blocked by settings");
            return StatusOutcome::failure("Ayarlar eksik.", None);
        }

        let envelope = wcf_envelope(
            "GetQueryJSON",
            &wcf_login_blob(settings),
            &wcf_query_blob("2", "TrackingNumber", tracking_number),
        );
        let url = &self.config().endpoints.integration_service_url;

        let raw = match self
            .post_soap(url, SOAP11_CONTENT_TYPE, Some(GET_QUERY_JSON_ACTION), envelope)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "status query could not reach the carrier");
                return StatusOutcome::failure(err.operator_message(), None);
            }
        };

        let payload = {
            let Ok(doc) = roxmltree::Document::parse(&raw) else {
                warn!("status response was not XML");
                return StatusOutcome::failure("Kargo durumu alınamadı", Some(raw));
            };
            match element_text(&doc, "GetQueryJSONResult") {
                Some(payload) => payload,
                None => {
                    warn!("status response carried no JSON payload");
                    return StatusOutcome::failure("Kargo durumu alınamadı", Some(raw));
                }
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "status payload did not parse as JSON");
                return StatusOutcome::failure("JSON parse hatası", Some(payload));
            }
        };

        let classification = classify(Some(&value), &self.config().aliases);
        info!(status = ?classification.status, "delivery status classified");
        StatusOutcome {
            success: classification.status != DeliveryStatus::Unknown,
            status: classification.status,
            message: classification.message,
            raw_response: Some(payload),
        }
    }
}

/// Classify a carrier status payload.
///
/// The record under inspection is the last element of an array payload
/// (movement lists are chronological, the last entry is current) or the
/// object itself. Delivery signals, in order:
///
/// 1. a status code parsing to `1`,
/// 2. a delivered marker in any field's text,
/// 3. a populated delivery date field.
///
/// Anything else with at least one field is in transit.
#[must_use]
pub fn classify(
    payload: Option<&serde_json::Value>,
    aliases: &FieldAliases,
) -> StatusClassification {
    let Some(record) = payload.and_then(select_record) else {
        return StatusClassification {
            status: DeliveryStatus::Unknown,
            message: "Kargo durumu alınamadı".to_owned(),
        };
    };

    // An alias holding an empty value does not shadow later aliases.
    let status_code = aliases
        .status_code_keys
        .iter()
        .find_map(|key| record.get(key.as_str()).and_then(code_as_text));

    // "01" and 1 both count; the carrier is not consistent about padding.
    let code_number = status_code
        .as_deref()
        .and_then(|code| code.parse::<i64>().ok());
    if code_number == Some(1) {
        return StatusClassification {
            status: DeliveryStatus::Delivered,
            message: "Kargo teslim edildi (DURUM_KODU=1)".to_owned(),
        };
    }

    // Some revisions only say it in prose.
    let has_delivered_text = record.values().any(|value| {
        let text = stringify(value).to_uppercase();
        aliases
            .delivered_text_markers
            .iter()
            .any(|marker| text.contains(&marker.to_uppercase()))
    });
    if has_delivered_text {
        return StatusClassification {
            status: DeliveryStatus::Delivered,
            message: "Kargo teslim edildi (metin kontrolü)".to_owned(),
        };
    }

    let delivery_date_field = aliases
        .delivery_date_keys
        .iter()
        .find(|key| record.get(key.as_str()).is_some_and(has_real_value));
    if let Some(field) = delivery_date_field {
        return StatusClassification {
            status: DeliveryStatus::Delivered,
            message: format!("Kargo teslim edildi ({field} mevcut)"),
        };
    }

    if record.is_empty() {
        return StatusClassification {
            status: DeliveryStatus::Unknown,
            message: "Kargo durumu alınamadı".to_owned(),
        };
    }

    let code_text = status_code.unwrap_or_else(|| "yok".to_owned());
    StatusClassification {
        status: DeliveryStatus::InTransit,
        message: format!("Kargo kargoda (DURUM_KODU={code_text})"),
    }
}

fn select_record(
    value: &serde_json::Value,
) -> Option<&serde_json::Map<String, serde_json::Value>> {
    match value {
        serde_json::Value::Array(items) => items.last().and_then(serde_json::Value::as_object),
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

/// A usable status code value. Empty strings and numeric zero read as
/// "no code here" so a later alias can still answer.
fn code_as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        serde_json::Value::Number(n) if n.as_i64() != Some(0) => Some(n.to_string()),
        _ => None,
    }
}

fn stringify(value: &serde_json::Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_owned)
}

/// A date field counts only when it holds something other than the
/// carrier's assorted spellings of "empty".
fn has_real_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed != "0" && !trimmed.eq_ignore_ascii_case("null")
        }
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aliases() -> FieldAliases {
        FieldAliases::default()
    }

    fn classify_value(value: &serde_json::Value) -> StatusClassification {
        classify(Some(value), &aliases())
    }

    #[test]
    fn test_status_code_one_is_delivered() {
        let payload = json!([{"DURUM_KODU": "1", "DURUM": "TESLIMAT"}]);
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::Delivered);
        assert_eq!(result.message, "Kargo teslim edildi (DURUM_KODU=1)");
    }

    #[test]
    fn test_numeric_status_code_one_is_delivered() {
        let payload = json!({"StatusCode": 1});
        assert_eq!(classify_value(&payload).status, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_empty_code_falls_through_to_later_alias() {
        let payload = json!({"DURUM_KODU": "", "StatusCode": "1"});
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::Delivered);
        assert_eq!(result.message, "Kargo teslim edildi (DURUM_KODU=1)");
    }

    #[test]
    fn test_zero_padded_code_is_delivered() {
        let payload = json!([{"DURUM_KODU": "01"}]);
        assert_eq!(classify_value(&payload).status, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_numeric_zero_code_reads_as_absent() {
        let payload = json!({"StatusCode": 0, "SUBE": "ŞİŞLİ"});
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::InTransit);
        assert_eq!(result.message, "Kargo kargoda (DURUM_KODU=yok)");
    }

    #[test]
    fn test_last_array_element_decides() {
        let payload = json!([
            {"DURUM_KODU": "1", "DURUM": "eski kayıt"},
            {"DURUM_KODU": "6", "DURUM": "DAĞITIMDA"}
        ]);
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::InTransit);
        assert_eq!(result.message, "Kargo kargoda (DURUM_KODU=6)");
    }

    #[test]
    fn test_delivered_prose_without_code() {
        let payload = json!({"DURUM": "Teslim Edildi", "ALICI": "AYŞE YILMAZ"});
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::Delivered);
        assert_eq!(result.message, "Kargo teslim edildi (metin kontrolü)");
    }

    #[test]
    fn test_populated_delivery_date_is_delivered() {
        let payload = json!({"DURUM_KODU": "6", "DURUM": "KARGO ISLEMDE", "TeslimTarihi": "02.05.2024 14:05"});
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::Delivered);
        assert_eq!(result.message, "Kargo teslim edildi (TeslimTarihi mevcut)");
    }

    #[test]
    fn test_placeholder_delivery_dates_do_not_deliver() {
        for placeholder in ["", "0", "null", "NULL"] {
            let payload = json!({"DURUM_KODU": "9", "TESLIM_TARIHI": placeholder});
            let result = classify_value(&payload);
            assert_eq!(result.status, DeliveryStatus::InTransit, "{placeholder:?}");
        }
    }

    #[test]
    fn test_branch_arrival_code_is_in_transit() {
        // Code 9 means "at the branch", not delivered.
        let payload = json!([{"DURUM_KODU": "9", "SUBE": "KADIKÖY"}]);
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::InTransit);
        assert_eq!(result.message, "Kargo kargoda (DURUM_KODU=9)");
    }

    #[test]
    fn test_record_without_code_is_in_transit_with_yok() {
        let payload = json!({"SUBE": "ÇANKAYA"});
        let result = classify_value(&payload);
        assert_eq!(result.status, DeliveryStatus::InTransit);
        assert_eq!(result.message, "Kargo kargoda (DURUM_KODU=yok)");
    }

    #[test]
    fn test_empty_payloads_are_unknown() {
        for payload in [json!({}), json!([]), json!("dize"), json!(null)] {
            let result = classify_value(&payload);
            assert_eq!(result.status, DeliveryStatus::Unknown, "{payload}");
            assert_eq!(result.message, "Kargo durumu alınamadı");
        }
        assert_eq!(
            classify(None, &aliases()).status,
            DeliveryStatus::Unknown
        );
    }

    #[test]
    fn test_status_query_blob_uses_query_type_two() {
        let blob = wcf_query_blob("2", "TrackingNumber", "8700123456");
        assert!(blob.contains("<QueryType>2</QueryType>"));
        assert!(blob.contains("<TrackingNumber>8700123456</TrackingNumber>"));
    }
}
