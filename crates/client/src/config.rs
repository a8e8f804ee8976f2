//! Client configuration: endpoints, field aliases, timeout.
//!
//! Everything here has a production default; nothing is required. The
//! carrier has renamed response fields between service revisions more than
//! once, so the alias lists the parsers consult are configuration rather
//! than constants baked into the parsing code.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ARAS_CARGO_SERVICE_URL` - Legacy `.asmx` cargo service (SetOrder, GetBarcode)
//! - `ARAS_INTEGRATION_SERVICE_URL` - WCF `.svc` integration service (queries)
//! - `ARAS_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)

use std::time::Duration;

/// Production URL of the legacy `.asmx` cargo service.
const DEFAULT_CARGO_SERVICE_URL: &str = "https://customerws.araskargo.com.tr/arascargoservice.asmx";

/// Production URL of the WCF `.svc` integration service.
const DEFAULT_INTEGRATION_SERVICE_URL: &str =
    "https://customerservices.araskargo.com.tr/ArasCargoCustomerIntegrationService/ArasCargoIntegrationService.svc";

/// Per-request timeout applied to every carrier call.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The two carrier service URLs.
///
/// The legacy cargo service accepts shipments and renders barcodes; the
/// WCF integration service answers tracking and status queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArasEndpoints {
    /// Legacy `.asmx` service (SetOrder, GetBarcode, GetOrder, GetCargoInfo).
    pub cargo_service_url: String,
    /// WCF `.svc` service (GetQueryDS, GetQueryJSON).
    pub integration_service_url: String,
}

impl Default for ArasEndpoints {
    fn default() -> Self {
        Self {
            cargo_service_url: DEFAULT_CARGO_SERVICE_URL.to_owned(),
            integration_service_url: DEFAULT_INTEGRATION_SERVICE_URL.to_owned(),
        }
    }
}

impl ArasEndpoints {
    /// Load endpoints from environment variables, falling back to the
    /// production URLs. Tests and the CLI use the overrides to point the
    /// client at a mock server.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            cargo_service_url: get_env_or_default("ARAS_CARGO_SERVICE_URL", DEFAULT_CARGO_SERVICE_URL),
            integration_service_url: get_env_or_default(
                "ARAS_INTEGRATION_SERVICE_URL",
                DEFAULT_INTEGRATION_SERVICE_URL,
            ),
        }
    }
}

/// Response field aliases consulted by the parsers.
///
/// Each list is ordered by priority: explicit names first, checked
/// exactly (ASCII case-insensitive); the `generic_leaf_fragments` are the
/// substring fallback of last resort and hits on them are logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAliases {
    /// Tracking-number tags inside the dataset query's inner XML.
    pub dataset_tracking_tags: Vec<String>,
    /// Key fragments for the JSON query, matched against upper-cased keys.
    pub json_tracking_fragments: Vec<String>,
    /// Tracking-number tags in legacy order-lookup responses.
    pub order_tracking_tags: Vec<String>,
    /// Tags the barcode probe checks for a ride-along tracking number.
    pub barcode_probe_tags: Vec<String>,
    /// Substring fragments for the last-resort leaf scan.
    pub generic_leaf_fragments: Vec<String>,
    /// Status-code keys in delivery query payloads.
    pub status_code_keys: Vec<String>,
    /// Upper-cased text markers meaning "delivered".
    pub delivered_text_markers: Vec<String>,
    /// Delivery-date keys whose presence implies delivery.
    pub delivery_date_keys: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            dataset_tracking_tags: to_strings(&[
                "KARGO_TAKIP_NO",
                "TrackingNumber",
                "KargoTakipNo",
                "TakipNo",
            ]),
            json_tracking_fragments: to_strings(&["TAKİP", "TAKIP", "TRACKING", "KARGO_TAKIP"]),
            order_tracking_tags: to_strings(&["TrackingNumber", "KargoTakipNo", "WaybillNo"]),
            barcode_probe_tags: to_strings(&[
                "TrackingNumber",
                "KargoTakipNo",
                "WaybillNo",
                "InvoiceKey",
            ]),
            generic_leaf_fragments: to_strings(&[
                "TAKIP", "TRACKING", "BARKOD", "BARCODE", "WAYBILL",
            ]),
            status_code_keys: to_strings(&["DURUM_KODU", "DurumKodu", "durumKodu", "StatusCode"]),
            delivered_text_markers: to_strings(&[
                "TESLİM EDİLDİ",
                "TESLIM EDILDI",
                "TESLİM",
                "DELIVERED",
            ]),
            delivery_date_keys: to_strings(&[
                "TESLIM_TARIHI",
                "TeslimTarihi",
                "DeliveryDate",
                "TESLIM_ZAMANI",
            ]),
        }
    }
}

/// Full client configuration.
#[derive(Debug, Clone)]
pub struct ArasConfig {
    pub endpoints: ArasEndpoints,
    pub aliases: FieldAliases,
    /// Per-request timeout. One carrier call per cascade attempt; the
    /// cascade never exceeds five attempts, so the worst case is bounded.
    pub timeout: Duration,
}

impl Default for ArasConfig {
    fn default() -> Self {
        Self {
            endpoints: ArasEndpoints::default(),
            aliases: FieldAliases::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ArasConfig {
    /// Load configuration from environment variables, falling back to
    /// production defaults throughout.
    #[must_use]
    pub fn from_env() -> Self {
        let timeout_secs = get_optional_env("ARAS_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            endpoints: ArasEndpoints::from_env(),
            aliases: FieldAliases::default(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_are_production() {
        let endpoints = ArasEndpoints::default();
        assert!(endpoints.cargo_service_url.contains("arascargoservice.asmx"));
        assert!(
            endpoints
                .integration_service_url
                .contains("ArasCargoIntegrationService.svc")
        );
    }

    #[test]
    fn test_default_aliases_cover_known_carrier_names() {
        let aliases = FieldAliases::default();
        assert_eq!(aliases.dataset_tracking_tags.first().unwrap(), "KARGO_TAKIP_NO");
        assert!(aliases.json_tracking_fragments.contains(&"TAKİP".to_owned()));
        assert_eq!(aliases.order_tracking_tags.len(), 3);
        assert!(aliases.generic_leaf_fragments.contains(&"WAYBILL".to_owned()));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(
            ArasConfig::default().timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }
}
