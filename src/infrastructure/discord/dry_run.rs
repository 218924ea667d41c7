//! Ack port that only logs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use crate::domain::entities::{ChannelId, MessageId};
use crate::domain::errors::AckError;
use crate::domain::ports::AckPort;

/// Logs acknowledgements instead of sending them.
#[derive(Debug, Default)]
pub struct LoggingAckSender {
    sent: AtomicUsize,
}

impl LoggingAckSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of acknowledgements logged so far.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AckPort for LoggingAckSender {
    async fn send_ack(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), AckError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        info!(%channel_id, %message_id, "Ack (dry run)");
        Ok(())
    }
}
