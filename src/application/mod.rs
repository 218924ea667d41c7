//! Application layer with the synchronizer services.

/// Stores and the sync engine.
pub mod services;

pub use services::{AckDebouncer, MarkReadOutcome, MuteStore, ReadStore, RunSummary, SyncEngine};
