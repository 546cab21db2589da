use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::DashboardError;

/// HTTP client for the flake statistics backend.
///
/// Every call is a single GET without retry or caching.
#[derive(Clone)]
pub struct FlakeDataClient {
    client: reqwest::Client,
}

impl FlakeDataClient {
    /// Create a client. Without a timeout, requests wait as long as the
    /// transport lets them.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch `url` and decode the body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, DashboardError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DashboardError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|source| DashboardError::Decode {
                url: url.to_string(),
                source,
            })?;
        log::debug!("Received: {}", data);
        Ok(data)
    }
}
