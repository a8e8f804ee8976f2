//! CLI command implementations.

pub mod label;
pub mod status;
pub mod track;

use std::time::Duration;

use aras_kargo_client::{ArasClient, ArasConfig};

/// Build a client from environment configuration, with an optional
/// timeout override from the command line.
pub(crate) fn build_client(timeout_secs: Option<u64>) -> ArasClient {
    let mut config = ArasConfig::from_env();
    if let Some(secs) = timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    ArasClient::with_config(config)
}
