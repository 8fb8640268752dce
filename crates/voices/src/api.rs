//! REST client for the voice catalog endpoints.
//!
//! Wraps `GET /voices` using [`reqwest`]. There is no retry or caching;
//! each call goes to the network.

use crate::config::VoiceConfig;
use crate::models::{Voice, VoicesResponse};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "xi-api-key";

/// HTTP client for the voice catalog.
pub struct VoiceCatalog {
    client: reqwest::Client,
    config: VoiceConfig,
}

/// Errors from the voice catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum VoiceApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Voice API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl VoiceCatalog {
    pub fn new(config: VoiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Fetch every voice available to the configured account.
    ///
    /// Returns an empty list without touching the network when no API key
    /// is configured.
    pub async fn list_voices(&self) -> Result<Vec<Voice>, VoiceApiError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let response = self
            .client
            .get(format!("{}/voices", self.config.base_url))
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let body: VoicesResponse = Self::parse_response(response).await?;
        let voices: Vec<Voice> = body.voices.into_iter().map(Voice::from).collect();
        tracing::debug!(count = voices.len(), "Fetched voice catalog");
        Ok(voices)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`VoiceApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, VoiceApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VoiceApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, VoiceApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
