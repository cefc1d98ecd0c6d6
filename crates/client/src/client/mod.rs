//! HTTP client for the Costly waitlist API.

pub mod health;
pub mod waitlist;

use reqwest::StatusCode;

use crate::error::{error_message, ClientError, Result};

/// HTTP client for the Costly waitlist API.
#[derive(Debug, Clone)]
pub struct CostlyClient {
    client: reqwest::Client,
    base_url: String,
}

impl CostlyClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body, or turn the response into a `ClientError`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                path: response.url().path().to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}
