//! Delivery status command.
//!
//! # Usage
//!
//! ```bash
//! aras-cli status 8700123456789
//! ```
//!
//! # Environment Variables
//!
//! - `ARAS_QUERY_USERNAME` / `ARAS_QUERY_PASSWORD` / `ARAS_QUERY_CUSTOMER_CODE`
//! - `ARAS_INTEGRATION_SERVICE_URL` - endpoint override

use aras_kargo_client::ArasSettings;

/// Query the delivery status and report the classification.
///
/// Returns whether a status could be determined.
pub async fn run(tracking_number: &str, timeout_secs: Option<u64>) -> bool {
    dotenvy::dotenv().ok();

    let settings = ArasSettings::from_env();
    let client = super::build_client(timeout_secs);

    let outcome = client
        .query_delivery_status(&settings, tracking_number)
        .await;

    tracing::info!(status = ?outcome.status, "{}", outcome.message);
    if let Some(raw) = &outcome.raw_response {
        tracing::debug!("Carrier payload: {raw}");
    }

    outcome.success
}
