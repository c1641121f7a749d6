//! Fault types surfaced by [`crate::Cpu::step`].

use snafu::Snafu;

/// A fault raised while decoding or executing a single instruction.
///
/// `UnsupportedAddressingMode` from the design notes is not a variant
/// here: with a correctly built `OPCODE_TABLE` it can never be reached,
/// so it is a `debug_assert!`/`unreachable!` in the instruction dispatch
/// path instead of a caller-visible error.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum CpuFault {
    #[snafu(display("undefined opcode {opcode:#04x} at {pc:#06x}"))]
    UndefinedOpcode { opcode: u8, pc: u16 },
}
