//! Waitlist API operations.

use reqwest::StatusCode;

use costly_core::waitlist::{
    CleanupResponse, CountResponse, JoinRequest, JoinResponse, SequenceResponse, WaitlistReport,
};

use super::CostlyClient;
use crate::error::{ClientError, Result};

impl CostlyClient {
    /// Join the waitlist.
    ///
    /// A 409 from the server becomes [`ClientError::AlreadyOnWaitlist`].
    pub async fn join(&self, email: &str) -> Result<JoinResponse> {
        let response = self
            .client
            .post(self.url("/waitlist-join"))
            .json(&JoinRequest::new(email))
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(ClientError::AlreadyOnWaitlist);
        }
        self.handle_response(response).await
    }

    /// Get the public signup counter.
    pub async fn count(&self) -> Result<CountResponse> {
        let response = self.client.get(self.url("/waitlist-count")).send().await?;
        self.handle_response(response).await
    }

    /// Get the read-only cleanup report.
    pub async fn cleanup_report(&self) -> Result<WaitlistReport> {
        let response = self
            .client
            .get(self.url("/waitlist-cleanup"))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Run the mutating cleanup.
    pub async fn cleanup_apply(&self) -> Result<CleanupResponse> {
        let response = self
            .client
            .post(self.url("/waitlist-cleanup"))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get the id sequence report.
    pub async fn fix_sequence(&self) -> Result<SequenceResponse> {
        let response = self
            .client
            .post(self.url("/waitlist-fix-sequence"))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
