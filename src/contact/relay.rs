//! Form relay client
//!
//! Contact submissions are delivered by Web3Forms. The relay answers with a
//! JSON body `{ "success": bool, "message": string }` whatever the HTTP
//! status, so the body is decoded without looking at the status code. Only a
//! body that is not JSON at all counts as a failure.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::ContactSubmission;

/// Decoded relay answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayReply {
    pub success: bool,
    pub message: Option<String>,
}

impl RelayReply {
    /// Read a reply from any JSON value.
    ///
    /// `success` is true only for a JSON `true`; `message` is kept only when
    /// it is a string. Other shapes read as absent.
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.map(str::to_string),
        }
    }
}

/// Failure to get a decodable answer from the relay
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayError {
    /// Request never completed (DNS, connect, TLS, reset)
    #[error("{0}")]
    Transport(String),

    /// Relay answered with something that is not the expected JSON
    #[error("{0}")]
    Parse(String),

    /// Failure without any message text
    #[error("unknown relay error")]
    Unknown,
}

impl RelayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::with_text(message.into(), Self::Transport)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::with_text(message.into(), Self::Parse)
    }

    fn with_text(message: String, wrap: fn(String) -> Self) -> Self {
        if message.trim().is_empty() {
            Self::Unknown
        } else {
            wrap(message)
        }
    }

    /// Message text for display, `None` for [`RelayError::Unknown`]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Transport(msg) | Self::Parse(msg) => Some(msg),
            Self::Unknown => None,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::parse(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

/// Delivery channel for contact submissions
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn submit(&self, submission: &ContactSubmission) -> Result<RelayReply, RelayError>;
}

/// Web3Forms client
pub struct Web3FormsRelay {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl Web3FormsRelay {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            access_key: access_key.into(),
        }
    }
}

#[async_trait]
impl ContactRelay for Web3FormsRelay {
    async fn submit(&self, submission: &ContactSubmission) -> Result<RelayReply, RelayError> {
        let form = reqwest::multipart::Form::new()
            .text("access_key", self.access_key.clone())
            .text("name", submission.name.clone())
            .text("phone", submission.phone.clone())
            .text("registered_number", submission.registered_number.clone())
            .text("message", submission.message.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            endpoint = %self.endpoint,
            status = %status,
            body_len = body.len(),
            "Form relay responded"
        );

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| RelayError::parse(e.to_string()))?;
        Ok(RelayReply::from_value(&value))
    }
}
