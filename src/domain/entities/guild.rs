//! Discord guild identity and ordering.

use serde::{Deserialize, Serialize};

/// Unique identifier for a Discord guild (server).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl GuildId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GuildId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for GuildId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

/// User-chosen order of guilds in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildPositions(Vec<GuildId>);

impl GuildPositions {
    /// Creates positions from an ordered list of guild IDs.
    #[must_use]
    pub const fn new(order: Vec<GuildId>) -> Self {
        Self(order)
    }

    /// Returns the ordered guild IDs.
    #[must_use]
    pub fn as_slice(&self) -> &[GuildId] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_id_from_str() {
        assert_eq!(GuildId::from("987654321").as_u64(), 987_654_321);
        assert_eq!(GuildId::from(""), GuildId(0));
    }

    #[test]
    fn test_guild_positions_order() {
        let positions = GuildPositions::new(vec![GuildId(3), GuildId(1), GuildId(2)]);

        assert_eq!(positions.as_slice(), &[GuildId(3), GuildId(1), GuildId(2)]);
        assert!(GuildPositions::default().as_slice().is_empty());
    }
}
