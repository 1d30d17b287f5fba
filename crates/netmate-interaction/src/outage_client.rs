//! HTTP client for the provider's outage-status service.

use async_trait::async_trait;
use netmate_core::config::OutageConfig;
use netmate_core::error::{NetmateError, Result};
use netmate_core::{CustomerId, OutageCheckResult, OutageChecker};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceInfoRequest<'a> {
    phone_number: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceInfoResponse {
    #[serde(default)]
    is_service_affected: Option<bool>,
    #[serde(default)]
    error_msg: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Asks the outage service whether a customer's area is affected.
///
/// One POST per check, bounded by the configured timeout, never retried.
#[derive(Clone)]
pub struct OutageCheckClient {
    client: Client,
    endpoint: String,
}

impl OutageCheckClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetmateError::config(format!("Failed to build outage HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &OutageConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, customer_id: &CustomerId) -> Result<ServiceInfoResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ServiceInfoRequest {
                phone_number: customer_id.as_str(),
            })
            .send()
            .await
            .map_err(|e| NetmateError::outage_check(describe(&e)))?;

        let response = response
            .error_for_status()
            .map_err(|e| NetmateError::outage_check(describe(&e)))?;

        let info = response
            .json::<ServiceInfoResponse>()
            .await
            .map_err(|e| NetmateError::outage_check(format!("Malformed response body: {e}")))?;

        match &info.error {
            Some(error) => Err(NetmateError::outage_check(format!(
                "Service reported an error: {error}"
            ))),
            None => Ok(info),
        }
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Connection failed: {err}")
    } else if let Some(status) = err.status() {
        format!("Unexpected status {status}")
    } else {
        err.to_string()
    }
}

#[async_trait]
impl OutageChecker for OutageCheckClient {
    async fn check(&self, customer_id: &CustomerId) -> OutageCheckResult {
        match self.request(customer_id).await {
            Ok(info) => OutageCheckResult::Status {
                is_service_affected: info.is_service_affected.unwrap_or(false),
                message: info.error_msg.unwrap_or_default(),
            },
            Err(e) => OutageCheckResult::Error(e.to_string()),
        }
    }
}
