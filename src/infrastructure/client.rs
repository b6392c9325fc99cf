use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::application::errors::ErrorResponse;

/// Thin HTTP client for a running anirewind server, used by the CLI.
pub struct RewindClient {
    base_url: Url,
    http: Client,
}

impl RewindClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent("anirewind-cli/0.1")
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
        })
    }

    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url)
    }

    /// Build (or fetch from cache) the year-in-review report for a user.
    pub async fn rewind(&self, username: &str, year: Option<i32>) -> Result<Value> {
        let mut url = self.endpoint("api/rewind")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("username", username);
            if let Some(year) = year {
                pairs.append_pair("year", &year.to_string());
            }
        }

        let response = self.http.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Fetch a previously generated report by its share id.
    pub async fn share(&self, share_id: &str) -> Result<Value> {
        let mut url = self.endpoint("api/share")?;
        url.query_pairs_mut().append_pair("shareId", share_id);

        let response = self.http.get(url).send().await?;
        self.handle_response(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        if response.status().is_success() {
            response
                .json()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.error);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
