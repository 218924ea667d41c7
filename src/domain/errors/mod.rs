//! Domain error types.

mod ack_error;

pub use ack_error::AckError;
