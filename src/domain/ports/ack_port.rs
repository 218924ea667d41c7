//! Outbound acknowledgement port.

use async_trait::async_trait;

use crate::domain::entities::{ChannelId, MessageId};
use crate::domain::errors::AckError;

/// Port for telling Discord a channel has been read up to a message.
///
/// Implementations must tolerate duplicate sends for the same message.
#[async_trait]
pub trait AckPort: Send + Sync {
    /// Marks `message_id` as read in `channel_id`.
    async fn send_ack(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), AckError>;
}
