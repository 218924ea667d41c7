//! Application services keeping read and mute state in sync.

pub mod ack_debouncer;
pub mod mute_store;
pub mod read_store;
pub mod sync_engine;

pub use ack_debouncer::{AckDebouncer, DEFAULT_ACK_COOLDOWN};
pub use mute_store::MuteStore;
pub use read_store::{CursorUpdate, ReadStore};
pub use sync_engine::{MarkReadOutcome, RunSummary, SyncEngine};
