//! Tracking resolution command.
//!
//! # Usage
//!
//! ```bash
//! aras-cli track ORD104212345
//! ```
//!
//! # Environment Variables
//!
//! - `ARAS_QUERY_USERNAME` / `ARAS_QUERY_PASSWORD` / `ARAS_QUERY_CUSTOMER_CODE`
//! - `ARAS_CARGO_SERVICE_URL` / `ARAS_INTEGRATION_SERVICE_URL` - endpoint overrides

use aras_kargo_client::ArasSettings;
use aras_kargo_core::{IntegrationCode, IntegrationCodeError};
use thiserror::Error;

/// Errors that can occur before the carrier is contacted.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The argument is not a usable integration code.
    #[error("Invalid integration code: {0}")]
    InvalidCode(#[from] IntegrationCodeError),
}

/// Run the tracking cascade and report the outcome.
///
/// Returns whether a tracking number was resolved.
pub async fn run(code: &str, timeout_secs: Option<u64>) -> Result<bool, TrackError> {
    dotenvy::dotenv().ok();

    let code = IntegrationCode::parse(code)?;
    let settings = ArasSettings::from_env();
    let client = super::build_client(timeout_secs);

    let outcome = client.resolve_tracking(&settings, &code).await;

    if let Some(number) = &outcome.tracking_number {
        tracing::info!("Tracking number: {number}");
    }
    tracing::info!("{}", outcome.message);

    if !outcome.success && let Some(raw) = &outcome.raw_response {
        tracing::info!("Carrier transcript:\n{raw}");
    }

    Ok(outcome.success)
}
