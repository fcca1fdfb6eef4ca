//! Submission endpoint seam and its HTTP implementation

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{Submission, SubmitError};

/// Black-box receiver of a form submission
#[async_trait]
pub trait SubmissionEndpoint {
    /// `Ok` only when the message was accepted for delivery
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError>;
}

/// Reply shape of the mail endpoint
#[derive(Debug, Deserialize)]
struct EndpointReply {
    status: String,
    #[serde(default)]
    message: String,
}

/// POSTs the fields as JSON to the mail endpoint
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionEndpoint for HttpEndpoint {
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.url)
            .json(&submission.fields)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let reply: Option<EndpointReply> = response.json().await.ok();
        if !status.is_success() {
            return match reply {
                Some(reply) if !reply.message.is_empty() => Err(SubmitError::Rejected(reply.message)),
                _ => Err(SubmitError::Status(status.as_u16())),
            };
        }
        match reply {
            Some(reply) if reply.status == "success" => Ok(()),
            Some(reply) => Err(SubmitError::Rejected(reply.message)),
            None => Err(SubmitError::Rejected("unreadable reply".to_string())),
        }
    }
}
