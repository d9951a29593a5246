//! Outbound transactional email.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::email::OutboundEmail;
use super::error::NotifyError;
use crate::config::NotifyConfig;

const DEFAULT_PROVIDER_ERROR: &str = "Failed to send email";

/// Sends rendered notifications. Returns the provider's response body.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Fails fast when credentials are missing, before the request is parsed.
    fn ensure_configured(&self) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn send(&self, email: &OutboundEmail) -> Result<Value, NotifyError>;
}

/// Resend-compatible HTTP mailer: `POST {from, to, subject, html}` with a
/// bearer token.
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl ResendMailer {
    /// Reads the API key from the configured environment variable.
    ///
    /// A missing key is not an error here; it is reported per request.
    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "Email API key not set, notifications will fail");
        }
        Self::new(config, api_key)
    }

    pub fn new(config: &NotifyConfig, api_key: Option<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key,
        })
    }

    fn api_key(&self) -> Result<&str, NotifyError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| NotifyError::MissingApiKey(self.api_key_env.clone()))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn ensure_configured(&self) -> Result<(), NotifyError> {
        self.api_key().map(|_| ())
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint, subject = %email.subject))]
    async fn send(&self, email: &OutboundEmail) -> Result<Value, NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key()?)
            .json(email)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NotifyError::Provider(provider_message(&body)));
        }
        info!(%status, "Email sent");
        Ok(body)
    }
}

fn provider_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_PROVIDER_ERROR)
        .to_string()
}
