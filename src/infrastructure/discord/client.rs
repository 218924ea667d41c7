//! Discord REST acknowledgement client.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{AckRequest, AckResponse, ErrorResponse};
use crate::domain::entities::{ChannelId, MessageId};
use crate::domain::errors::AckError;
use crate::domain::ports::AckPort;

/// Default Discord REST API base URL.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// Sends read acknowledgements through the Discord REST API.
///
/// Discord hands back an ack token with every acknowledgement; it is
/// forwarded with the next one.
pub struct DiscordAckClient {
    client: Client,
    base_url: String,
    token: String,
    last_ack_token: Mutex<Option<String>>,
}

impl DiscordAckClient {
    /// Creates a client against the default API.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: impl Into<String>) -> Result<Self, AckError> {
        Self::with_base_url(token, DISCORD_API_BASE, Duration::from_secs(30))
    }

    /// Creates a client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AckError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AckError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            last_ack_token: Mutex::new(None),
        })
    }

    fn ack_url(&self, channel_id: ChannelId, message_id: MessageId) -> String {
        format!(
            "{}/channels/{channel_id}/messages/{message_id}/ack",
            self.base_url
        )
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> AckError {
        let body = response.json::<ErrorResponse>().await.ok();
        error_from_status(status, body)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn error_from_status(status: StatusCode, body: Option<ErrorResponse>) -> AckError {
    let retry_after_ms = body
        .as_ref()
        .and_then(|error| error.retry_after)
        .map_or(DEFAULT_RETRY_AFTER_MS, |secs| (secs * 1000.0).max(0.0) as u64);
    let message = body.map_or_else(|| format!("HTTP {status}"), |error| error.message);

    match status {
        StatusCode::UNAUTHORIZED => AckError::unauthorized("invalid or expired token"),
        StatusCode::FORBIDDEN => AckError::unauthorized(format!("access denied: {message}")),
        StatusCode::TOO_MANY_REQUESTS => AckError::RateLimited { retry_after_ms },
        s if s.is_server_error() => AckError::unavailable(message),
        _ => AckError::unexpected(format!("unexpected response: {status} - {message}")),
    }
}

#[async_trait]
impl AckPort for DiscordAckClient {
    async fn send_ack(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), AckError> {
        let url = self.ack_url(channel_id, message_id);
        let previous = self.last_ack_token.lock().clone();

        debug!(%channel_id, %message_id, "Sending ack");

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, &self.token)
            .json(&AckRequest {
                token: previous.as_deref(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Discord API");
                if e.is_timeout() {
                    AckError::network("request timed out")
                } else if e.is_connect() {
                    AckError::network("failed to connect to Discord")
                } else {
                    AckError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        match response.json::<AckResponse>().await {
            Ok(AckResponse { token: Some(token) }) => *self.last_ack_token.lock() = Some(token),
            Ok(AckResponse { token: None }) => {}
            Err(e) => debug!(error = %e, "Ack response carried no token"),
        }

        Ok(())
    }
}
