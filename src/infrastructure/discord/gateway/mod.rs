mod codec;
mod constants;
mod error;
mod payloads;

pub use codec::EventParser;
pub use constants::DISPATCH_OPCODE;
pub use error::{GatewayError, GatewayResult};
pub use payloads::GatewayMessage;
