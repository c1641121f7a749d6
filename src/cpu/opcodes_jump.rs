//! Branches, jumps/calls, and the `BRK`/`RTI` interrupt-return pair.
//!
//! Grounded in the teacher repo's `opcodes_jump.rs`, including its
//! shared `branch` helper shape. The teacher's `brk` jumps to the reset
//! vector; this corrects it to the documented IRQ/BRK vector at
//! `$FFFE`.

use crate::cpu::Cpu;
use crate::memory::Memory;
use crate::opcodes::Mode;
use crate::registers::StatusFlags;

/// Shared by every conditional branch: branches when `flag`'s presence
/// in `P` equals `when_set`.
pub fn branch<M: Memory>(cpu: &mut Cpu<M>, flag: StatusFlags, when_set: bool) {
    let target = cpu.resolve_branch_target();
    if cpu.status.contains(flag) == when_set {
        cpu.pc = target;
    }
}

pub fn jmp<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    cpu.pc = cpu.resolve_address(mode);
}

pub fn jsr<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let target = cpu.resolve_address(mode);
    // `resolve_address(Absolute)` has already advanced `PC` past both
    // operand bytes; the pushed return address is one less than that,
    // which `rts` corrects for on the way back.
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_u16(return_address);
    cpu.pc = target;
}

pub fn rts<M: Memory>(cpu: &mut Cpu<M>) {
    let return_address = cpu.pull_u16();
    cpu.pc = return_address.wrapping_add(1);
}

/// Pushes `PC + 1` (skipping BRK's padding byte) and `P` with `BREAK`
/// forced high, sets `I`, then loads `PC` from the IRQ/BRK vector.
pub fn brk<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.push_u16(cpu.pc);
    let status = (cpu.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits();
    cpu.push_u8(status);
    cpu.status.insert(StatusFlags::INTERRUPT_DISABLE);
    cpu.pc = cpu.load_irq_brk_vector();
}

/// Pops `P` (forcing bit 5 high; `BREAK` carries no latched meaning back
/// off the stack) then `PC`, without the `+1` adjustment `rts` applies.
pub fn rti<M: Memory>(cpu: &mut Cpu<M>) {
    let status = cpu.pull_u8();
    cpu.status = StatusFlags::from_bits_truncate(status) | StatusFlags::UNUSED;
    cpu.pc = cpu.pull_u16();
}
