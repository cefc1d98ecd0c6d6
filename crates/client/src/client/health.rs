//! Health check operations.

use reqwest::StatusCode;

use costly_core::waitlist::ReadinessResponse;

use super::CostlyClient;
use crate::error::Result;

impl CostlyClient {
    /// Check that the server is accepting connections.
    pub async fn live(&self) -> Result<bool> {
        let response = self.client.get(self.url("/livez")).send().await?;
        Ok(response.status().is_success())
    }

    /// Check that the server can reach its store.
    ///
    /// A 503 still carries a readiness body, so it is returned rather than
    /// treated as an error.
    pub async fn ready(&self) -> Result<ReadinessResponse> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        self.handle_response(response).await
    }
}
