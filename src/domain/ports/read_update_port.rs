//! Callbacks produced by the synchronizer.

use crate::domain::entities::{GuildPositions, ReadState};

/// Receives read cursor changes for unmuted channels.
///
/// Called synchronously from the triggering operation; implementations
/// should hand the update off rather than block.
pub trait ReadUpdateListener: Send + Sync {
    /// Called with the updated cursor.
    fn on_read_update(&self, state: &ReadState);
}

impl<F> ReadUpdateListener for F
where
    F: Fn(&ReadState) + Send + Sync,
{
    fn on_read_update(&self, state: &ReadState) {
        self(state);
    }
}

/// Receives guild sidebar order changes.
pub trait GuildPositionsListener: Send + Sync {
    /// Called with the new guild order.
    fn on_guild_positions(&self, positions: &GuildPositions);
}

impl<F> GuildPositionsListener for F
where
    F: Fn(&GuildPositions) + Send + Sync,
{
    fn on_guild_positions(&self, positions: &GuildPositions) {
        self(positions);
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Listener that records every update it receives.
    #[derive(Default)]
    pub struct RecordingListener {
        updates: Mutex<Vec<ReadState>>,
    }

    impl RecordingListener {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn updates(&self) -> Vec<ReadState> {
            self.updates.lock().clone()
        }

        pub fn count(&self) -> usize {
            self.updates.lock().len()
        }
    }

    impl ReadUpdateListener for RecordingListener {
        fn on_read_update(&self, state: &ReadState) {
            self.updates.lock().push(state.clone());
        }
    }
}
