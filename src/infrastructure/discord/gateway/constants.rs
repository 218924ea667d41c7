/// Opcode carrying dispatch events.
pub const DISPATCH_OPCODE: u8 = 0;
