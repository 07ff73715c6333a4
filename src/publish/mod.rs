//! Status publishing.
//!
//! Posts the rendered summary as a single public status update using
//! OAuth 1.0a user-context credentials. Failures surface as
//! [`BuoyError::Publish`](crate::error::BuoyError::Publish), which callers
//! treat as non-fatal.

pub mod oauth;

use crate::config::PublishCredentials;
use crate::constants::{HTTP_TIMEOUT_SECS, STATUS_ENDPOINT, USER_AGENT};
use crate::error::{BuoyError, Result};
use oauth::OAuthSigner;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Destination for rendered summaries
#[allow(async_fn_in_trait)]
pub trait Publisher {
    /// Post `text`, returning the text echoed back by the service
    async fn publish(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct StatusRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    data: PostedStatus,
}

#[derive(Debug, Deserialize)]
struct PostedStatus {
    id: String,
    text: String,
}

/// Publishes status updates to the configured endpoint
pub struct StatusPublisher {
    client: reqwest::Client,
    credentials: PublishCredentials,
    endpoint: String,
}

impl StatusPublisher {
    pub fn new(credentials: PublishCredentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(BuoyError::publish)?;

        Ok(Self::with_client(client, credentials, STATUS_ENDPOINT))
    }

    pub fn with_client(
        client: reqwest::Client,
        credentials: PublishCredentials,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            credentials,
            endpoint: endpoint.into(),
        }
    }
}

impl Publisher for StatusPublisher {
    async fn publish(&self, text: &str) -> Result<String> {
        info!("Preparing to publish observation...");

        // JSON bodies are not part of the OAuth signature
        let authorization =
            OAuthSigner::new(&self.credentials).authorization("POST", &self.endpoint, &[])?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .json(&StatusRequest { text })
            .send()
            .await
            .map_err(BuoyError::publish)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BuoyError::publish(format!("HTTP {}: {}", status, body.trim())));
        }

        let posted: StatusResponse = response.json().await.map_err(BuoyError::publish)?;
        debug!("Published status {}", posted.data.id);
        Ok(posted.data.text)
    }
}
