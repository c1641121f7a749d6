//! Load/store, register transfer, and stack instructions.
//!
//! Grounded in the teacher repo's `opcodes_move.rs`, generalized off the
//! concrete `Cpu6502`/`Bus` pair onto `Cpu<M: Memory>`.

use crate::cpu::Cpu;
use crate::memory::Memory;
use crate::opcodes::Mode;
use crate::registers::StatusFlags;

pub fn lda<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let value = cpu.read_operand(mode);
    cpu.a = value;
    cpu.status.set_zero_and_negative(value);
}

pub fn ldx<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let value = cpu.read_operand(mode);
    cpu.x = value;
    cpu.status.set_zero_and_negative(value);
}

pub fn ldy<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let value = cpu.read_operand(mode);
    cpu.y = value;
    cpu.status.set_zero_and_negative(value);
}

pub fn sta<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let address = cpu.resolve_address(mode);
    cpu.write(address, cpu.a);
}

pub fn stx<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let address = cpu.resolve_address(mode);
    cpu.write(address, cpu.x);
}

pub fn sty<M: Memory>(cpu: &mut Cpu<M>, mode: Mode) {
    let address = cpu.resolve_address(mode);
    cpu.write(address, cpu.y);
}

pub fn tax<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.x = cpu.a;
    cpu.status.set_zero_and_negative(cpu.x);
}

pub fn tay<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.y = cpu.a;
    cpu.status.set_zero_and_negative(cpu.y);
}

pub fn txa<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.a = cpu.x;
    cpu.status.set_zero_and_negative(cpu.a);
}

pub fn tya<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.a = cpu.y;
    cpu.status.set_zero_and_negative(cpu.a);
}

pub fn tsx<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.x = cpu.sp;
    cpu.status.set_zero_and_negative(cpu.x);
}

/// `TXS` does not touch any flag. The teacher snapshot's `txs` updates
/// `N`/`Z` from the new stack pointer; real 6502 hardware leaves `P`
/// untouched, so this corrects that.
pub fn txs<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.sp = cpu.x;
}

pub fn pha<M: Memory>(cpu: &mut Cpu<M>) {
    cpu.push_u8(cpu.a);
}

/// `PHP` always pushes `P` with bits 4 and 5 forced high, regardless of
/// what `BREAK`/`UNUSED` currently hold in the live register.
pub fn php<M: Memory>(cpu: &mut Cpu<M>) {
    let value = (cpu.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits();
    cpu.push_u8(value);
}

pub fn pla<M: Memory>(cpu: &mut Cpu<M>) {
    let value = cpu.pull_u8();
    cpu.a = value;
    cpu.status.set_zero_and_negative(value);
}

/// `PLP` loads `P` verbatim from the stack byte, then forces bit 5 high
/// on read-back; bit 4 (`BREAK`) has no latched meaning off the stack
/// and is left as popped.
pub fn plp<M: Memory>(cpu: &mut Cpu<M>) {
    let value = cpu.pull_u8();
    cpu.status = StatusFlags::from_bits_truncate(value) | StatusFlags::UNUSED;
}
