//! Cordsync - read-state and mute-state synchronizer for Discord clients.
//!
//! Keeps a local view of what has been read and what is muted consistent
//! with Discord while gateway events and user actions arrive concurrently,
//! and rate-limits the read acknowledgements sent back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the stores and the sync engine.
pub mod application;
/// Domain layer containing entities, events, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "cordsync";
