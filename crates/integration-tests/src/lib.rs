//! Integration tests for the Aras Kargo client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aras-kargo-integration-tests
//! ```
//!
//! Each test starts a local `wiremock` server playing the carrier and
//! points both service endpoints at it; nothing here talks to the real
//! carrier. This library holds the shared fixtures.
//!
//! # Test Categories
//!
//! - `submit_shipment` - SetOrder submission and response handling
//! - `tracking_cascade` - the five-operation tracking query cascade
//! - `label_and_status` - barcode fetch and delivery-status classification

use std::time::Duration;

use aras_kargo_client::{
    AddressIdMode, ArasClient, ArasConfig, ArasEndpoints, ArasSettings,
};
use aras_kargo_core::{ShipmentItem, ShipmentRequest, ShippingAddress, Supplier};
use secrecy::SecretString;

/// Path the mock carrier serves the legacy cargo service under.
pub const CARGO_SERVICE_PATH: &str = "/arascargoservice.asmx";

/// Path the mock carrier serves the WCF integration service under.
pub const INTEGRATION_SERVICE_PATH: &str = "/ArasCargoIntegrationService.svc";

/// Settings with every credential populated.
#[must_use]
pub fn test_settings() -> ArasSettings {
    ArasSettings {
        sender_username: "sender-user".to_owned(),
        sender_password: SecretString::from("sender-pass"),
        query_username: "query-user".to_owned(),
        query_password: SecretString::from("query-pass"),
        query_customer_code: "123456".to_owned(),
        address_id_mode: AddressIdMode::Active,
    }
}

/// A client with both service endpoints pointed at the mock server.
#[must_use]
pub fn client_for(mock_base: &str) -> ArasClient {
    client_for_split(mock_base, mock_base)
}

/// A client with each service pointed at its own base URL. Used to fail
/// one service while the other keeps answering.
#[must_use]
pub fn client_for_split(cargo_base: &str, integration_base: &str) -> ArasClient {
    let config = ArasConfig {
        endpoints: ArasEndpoints {
            cargo_service_url: format!("{cargo_base}{CARGO_SERVICE_PATH}"),
            integration_service_url: format!("{integration_base}{INTEGRATION_SERVICE_PATH}"),
        },
        timeout: Duration::from_secs(5),
        ..ArasConfig::default()
    };
    ArasClient::with_config(config)
}

/// A realistic single-piece shipment request for an Istanbul order.
#[must_use]
pub fn test_request() -> ShipmentRequest {
    ShipmentRequest {
        order_number: "#1042".to_owned(),
        items: vec![
            ShipmentItem {
                title: "Pamuklu Tişört".to_owned(),
                quantity: 2,
            },
            ShipmentItem {
                title: "Keten Gömlek".to_owned(),
                quantity: 1,
            },
        ],
        address: ShippingAddress {
            first_name: "Ayşe".to_owned(),
            last_name: "Yılmaz".to_owned(),
            address1: "Bağdat Caddesi No:1".to_owned(),
            address2: None,
            district: "Kadıköy".to_owned(),
            province: "İstanbul".to_owned(),
            phone: "+90 555 111 22 33".to_owned(),
            postal_code: Some("34720".to_owned()),
        },
        supplier: Supplier {
            name: "Depo A".to_owned(),
            code: "DEPOA".to_owned(),
            carrier_branch_id: "812".to_owned(),
        },
        piece_count: 1,
    }
}

/// Wrap a body fragment in the SOAP envelope the legacy service answers
/// with.
#[must_use]
pub fn soap_body(inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
         <soap:Body>{inner}</soap:Body></soap:Envelope>"
    )
}

/// A `GetQueryDS` response whose result element carries escaped inner XML.
#[must_use]
pub fn dataset_response(inner_xml: &str) -> String {
    let escaped = inner_xml.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");
    soap_body(&format!(
        "<GetQueryDSResponse><GetQueryDSResult>{escaped}</GetQueryDSResult></GetQueryDSResponse>"
    ))
}

/// A `GetQueryJSON` response wrapping the given JSON payload.
#[must_use]
pub fn json_query_response(payload: &str) -> String {
    let escaped = payload.replace('&', "&amp;").replace('<', "&lt;");
    soap_body(&format!(
        "<GetQueryJSONResponse><GetQueryJSONResult>{escaped}</GetQueryJSONResult></GetQueryJSONResponse>"
    ))
}
