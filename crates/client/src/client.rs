//! The carrier client.
//!
//! One shared `reqwest::Client` behind an `Arc`, cheap to clone into
//! request handlers. The client holds no per-shipment state; credentials
//! arrive with every call, so one instance serves every merchant.

use std::sync::Arc;

use tracing::debug;

use crate::config::ArasConfig;
use crate::error::ArasError;

/// Aras Kargo SOAP client.
///
/// All public operations return outcome structs rather than errors: a
/// carrier rejection, a transport failure, and a missing credential all
/// fold into `{success: false, message, raw_response}` so callers render
/// one shape to operators.
#[derive(Clone)]
pub struct ArasClient {
    inner: Arc<ArasClientInner>,
}

pub(crate) struct ArasClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ArasConfig,
}

impl std::fmt::Debug for ArasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArasClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ArasClient {
    /// Create a client with the default (production) configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ArasConfig::default())
    }

    /// Create a client with explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn with_config(config: ArasConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ArasClientInner { http, config }),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ArasConfig {
        &self.inner.config
    }

    /// POST a SOAP envelope and return the raw response body.
    ///
    /// The carrier signals business failures inside 200 responses and
    /// SOAP faults inside 500 responses, so the status code is logged but
    /// never turned into an error here; the per-operation parsers decide.
    pub(crate) async fn post_soap(
        &self,
        url: &str,
        content_type: &'static str,
        soap_action: Option<&'static str>,
        envelope: String,
    ) -> Result<String, ArasError> {
        let mut request = self
            .inner
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(envelope);

        if let Some(action) = soap_action {
            request = request.header("SOAPAction", action);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%status, bytes = body.len(), "carrier responded");

        Ok(body)
    }
}

impl Default for ArasClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_shows_config_not_internals() {
        let client = ArasClient::new();
        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("ArasClient"));
        assert!(debug_output.contains("arascargoservice.asmx"));
    }

    #[test]
    fn test_clone_shares_inner() {
        let client = ArasClient::new();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.inner, &clone.inner));
    }
}
