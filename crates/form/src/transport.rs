use std::time::Duration;

use async_trait::async_trait;
use mervolt_contact::ContactSubmission;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("relay rejected submission with status {status}")]
    Rejected { status: u16 },
}

/// Delivers one submission to the relay endpoint.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn submit(&self, form: &ContactSubmission) -> Result<(), SubmitError>;
}

/// Posts the form as JSON over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SubmitError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn submit(&self, form: &ContactSubmission) -> Result<(), SubmitError> {
        let response = self.client.post(&self.endpoint).json(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "relay rejected submission");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
