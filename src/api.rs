use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

pub const CONNECTIVITY_MESSAGE: &str = "Could not reach the advice service. Check your connection and try again.";

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("Describe your situation first.")]
    EmptySituation,
    #[error("{message}")]
    Remote { status: StatusCode, message: String },
    #[error("{}", CONNECTIVITY_MESSAGE)]
    MissingAdvice,
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Transport(#[from] reqwest::Error),
}

// Either field may be absent depending on the outcome
#[derive(Deserialize, Debug, Default)]
struct AdviceResponse {
    advice: Option<String>,
    error: Option<String>,
}

pub struct AdviceClient {
    client: Client,
    endpoint: String,
}

impl AdviceClient {
    pub fn new(endpoint: impl Into<String>) -> AdviceClient {
        AdviceClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn request_advice(&self, situation: &str) -> Result<String, AdviceError> {
        if situation.trim().is_empty() {
            return Err(AdviceError::EmptySituation);
        }

        debug!(endpoint = %self.endpoint, "requesting advice");
        let res = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "situation": situation }))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        let parsed: AdviceResponse = serde_json::from_str(&body).unwrap_or_default();

        if status.is_success() {
            if let Some(advice) = parsed.advice {
                return Ok(advice);
            }
        }

        warn!(%status, "advice request failed");
        match parsed.error {
            Some(message) if !message.trim().is_empty() => {
                Err(AdviceError::Remote { status, message })
            }
            _ => Err(AdviceError::MissingAdvice),
        }
    }
}
