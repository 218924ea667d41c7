//! Domain layer with core entities, events and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Inbound event definitions.
pub mod events;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{ChannelId, GuildId, MessageId, ReadState};
pub use errors::AckError;
pub use events::{ReadySnapshot, SyncEvent};
pub use ports::{AckPort, ChannelInfoPort, GuildPositionsListener, ReadUpdateListener};
