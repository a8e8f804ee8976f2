//! Label fetch command.
//!
//! # Usage
//!
//! ```bash
//! # Log the base64 payload size only
//! aras-cli label ORD104212345
//!
//! # Write the decoded bytes (the carrier sends a ZIP of label files)
//! aras-cli label ORD104212345 --out label.zip
//! ```
//!
//! # Environment Variables
//!
//! - `ARAS_QUERY_USERNAME` / `ARAS_QUERY_PASSWORD` / `ARAS_QUERY_CUSTOMER_CODE`
//! - `ARAS_CARGO_SERVICE_URL` - endpoint override

use std::path::Path;

use aras_kargo_client::{ArasError, ArasSettings};
use aras_kargo_core::{IntegrationCode, IntegrationCodeError};
use thiserror::Error;

/// Errors that can occur during a label fetch.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The argument is not a usable integration code.
    #[error("Invalid integration code: {0}")]
    InvalidCode(#[from] IntegrationCodeError),

    /// The label payload could not be decoded.
    #[error("Label decode error: {0}")]
    Decode(#[from] ArasError),

    /// The output file could not be written.
    #[error("Could not write label file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch the label and optionally write the decoded bytes to a file.
///
/// Returns whether the carrier produced a label.
pub async fn run(
    code: &str,
    out: Option<&Path>,
    timeout_secs: Option<u64>,
) -> Result<bool, LabelError> {
    dotenvy::dotenv().ok();

    let code = IntegrationCode::parse(code)?;
    let settings = ArasSettings::from_env();
    let client = super::build_client(timeout_secs);

    let outcome = client.fetch_label(&settings, &code).await;
    tracing::info!("{}", outcome.message);

    if outcome.success {
        if let Some(path) = out {
            let bytes = outcome.decode()?;
            tokio::fs::write(path, &bytes).await?;
            tracing::info!("Wrote decoded label to {} ({} bytes)", path.display(), bytes.len());
        } else if let Some(encoded) = &outcome.label_base64 {
            tracing::info!("Label payload: {} base64 characters", encoded.len());
        }
    }

    Ok(outcome.success)
}
