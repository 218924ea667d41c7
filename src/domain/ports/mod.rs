mod ack_port;
mod channel_info_port;
mod read_update_port;

pub use ack_port::AckPort;
pub use channel_info_port::ChannelInfoPort;
pub use read_update_port::{GuildPositionsListener, ReadUpdateListener};

#[cfg(test)]
pub use channel_info_port::MockChannelInfoPort;
