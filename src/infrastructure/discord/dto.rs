//! Discord REST payloads used by the ack client.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct AckRequest<'a> {
    pub token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct AckResponse {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub retry_after: Option<f64>,
}
