//! Bot API transport over HTTP: `POST {api_url}/bot{token}/{method}` with a JSON body.

use async_trait::async_trait;
use dbot_core::{DbotError, Fields, Response, Result, Transport};
use tracing::{debug, warn};

use crate::config::DEFAULT_API_URL;

/// [`Transport`] backed by reqwest. The API URL is configurable so tests can target a mock server.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    token: String,
    api_url: String,
}

impl HttpTransport {
    /// `api_url` defaults to the public Bot API; a trailing slash is ignored.
    pub fn new(token: impl Into<String>, api_url: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            api_url: api_url
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, fields: Fields) -> Result<Response> {
        debug!(method = %method, field_count = fields.len(), "step: Bot API call");

        let http_response = self
            .client
            .post(self.method_url(method))
            .json(&fields)
            .send()
            .await
            .map_err(|e| DbotError::Transport(format!("{} request failed: {}", method, e)))?;

        // The Bot API reports refusals (4xx) through the same envelope.
        let status = http_response.status();
        let response: Response = http_response.json().await.map_err(|e| {
            DbotError::Transport(format!(
                "{} returned an unreadable response (HTTP {}): {}",
                method, status, e
            ))
        })?;

        if !response.ok {
            warn!(
                method = %method,
                error_code = ?response.error_code,
                description = ?response.description,
                "Bot API refused call"
            );
        }
        Ok(response)
    }
}
