//! Domain entity definitions.

mod channel;
mod guild;
mod message;
mod mute;
mod read_state;

pub use channel::ChannelId;
pub use guild::{GuildId, GuildPositions};
pub use message::MessageId;
pub use mute::{ChannelOverride, GuildMuteSettings, MuteEntry, NotificationLevel};
pub use read_state::ReadState;
