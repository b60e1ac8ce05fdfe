use reqwest::{Client, StatusCode};
use shared::protocol::{ErrorReply, RsvpSubmission, SubmissionReceipt, UpdateAck};
use thiserror::Error;
use tracing::warn;
use url::Url;

const GENERIC_FAILURE: &str = "Something went wrong submitting your RSVP. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server answered with a non-success status. `message` is what the
    /// guest should see: the server's own error text when it sent one, the
    /// generic fallback otherwise.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    /// The request never completed.
    #[error("rsvp submission failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Posts the RSVP payload to the submission endpoint. One request per call,
/// no retries, no deduplication; keeping the submit button disabled while a
/// request is in flight is the UI's job.
pub struct SubmissionClient {
    http: Client,
    endpoint: Url,
}

impl SubmissionClient {
    pub fn new(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// An `Ok` return is the signal to reset the form to its empty state.
    /// On any `Err` the caller keeps the form as-is so the guest can retry.
    pub async fn submit(&self, submission: &RsvpSubmission) -> Result<UpdateAck, SubmitError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorReply>()
                .await
                .ok()
                .map(|reply| reply.error)
                .filter(|error| !error.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(%status, "rsvp submission rejected");
            return Err(SubmitError::Rejected { status, message });
        }

        let receipt: SubmissionReceipt = response.json().await?;
        Ok(receipt.data)
    }
}
