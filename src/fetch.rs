//! HTTP retrieval of the NDBC realtime feed.

use crate::constants::{HTTP_TIMEOUT_SECS, STATION_PLACEHOLDER, USER_AGENT};
use crate::error::{BuoyError, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Source of raw feed bytes for a station
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn fetch(&self, station: &str) -> Result<Vec<u8>>;
}

/// Client for the NDBC realtime2 text feeds
pub struct NdbcClient {
    client: reqwest::Client,
    url_template: String,
}

impl NdbcClient {
    /// Create a client for a feed URL template containing `{station}`
    pub fn new(url_template: impl Into<String>) -> Result<Self> {
        let url_template = url_template.into();
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| BuoyError::fetch(url_template.as_str(), e))?;

        Ok(Self::with_client(client, url_template))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }

    pub fn url_for(&self, station: &str) -> String {
        self.url_template.replace(STATION_PLACEHOLDER, station)
    }
}

impl FeedSource for NdbcClient {
    async fn fetch(&self, station: &str) -> Result<Vec<u8>> {
        let url = self.url_for(station);
        info!("Fetching latest observation from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BuoyError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BuoyError::fetch(url, format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BuoyError::fetch(url.as_str(), e))?;

        debug!("Received {} bytes ({})", body.len(), status);
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn local_client(url_template: String) -> NdbcClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        NdbcClient::with_client(client, url_template)
    }

    #[test]
    fn test_url_for_station() {
        let client = NdbcClient::new("https://www.ndbc.noaa.gov/data/realtime2/{station}.txt")
            .unwrap();
        assert_eq!(
            client.url_for("46026"),
            "https://www.ndbc.noaa.gov/data/realtime2/46026.txt"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let base = serve_once("200 OK", "#YY  MM DD hh mm\n").await;
        let client = local_client(format!("{}/{{station}}.txt", base));

        let body = client.fetch("46026").await.unwrap();
        assert_eq!(body, b"#YY  MM DD hh mm\n");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_fetch_error() {
        let base = serve_once("404 Not Found", "not found").await;
        let client = local_client(format!("{}/{{station}}.txt", base));

        let err = client.fetch("00000").await.unwrap_err();
        match err {
            BuoyError::Fetch { url, reason } => {
                assert!(url.ends_with("/00000.txt"));
                assert!(reason.contains("404"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_fetch_error() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(format!("http://{}/{{station}}.txt", addr));
        let err = client.fetch("46026").await.unwrap_err();
        assert!(matches!(err, BuoyError::Fetch { .. }));
    }
}
