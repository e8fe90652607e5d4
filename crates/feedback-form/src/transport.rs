#![allow(async_fn_in_trait)]
use feedback_types::Submission;
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const FEEDBACK_PATH: &str = "api/feedback";

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Server rejected feedback with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("Request failed: {0}")]
    Network(#[source] GenericError),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(Box::new(e))
    }
}

/// Delivers a submission to the feedback endpoint.
pub trait Transport {
    async fn send(&self, submission: &Submission) -> Result<(), TransportError>;
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, server_url: &Url) -> Result<Self, url::ParseError> {
        let endpoint = server_url.join(FEEDBACK_PATH)?;
        Ok(HttpTransport { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, submission: &Submission) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await?;
        let status = response.status();
        debug!("Feedback endpoint responded with {status}");
        if status.is_success() {
            Ok(())
        } else {
            // Body is only informative, failure to read it does not change the outcome
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|r| r.error);
            Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}
