#![macro_use]

//! Test scaffolding grounded in the teacher repo's own
//! `cpu_6502/test_helpers.rs`: the same `register_a!`/`register_x!`/
//! `register_y!`/`status!` macro shapes and `assert_status` flag-diff
//! helper, adapted to run raw opcode byte programs directly instead of
//! through an assembler (this crate carries no assembler; see
//! SPEC_FULL.md's Non-goals).

use crate::cpu::Cpu;
use crate::memory::FlatMemory;
use crate::registers::StatusFlags;

pub const LOAD_ADDRESS: u16 = 0x0200;

pub const P: u8 = StatusFlags::UNUSED.bits();
pub const C: u8 = StatusFlags::CARRY.bits();
pub const Z: u8 = StatusFlags::ZERO.bits();
pub const I: u8 = StatusFlags::INTERRUPT_DISABLE.bits();
pub const D: u8 = StatusFlags::DECIMAL.bits();
pub const B: u8 = StatusFlags::BREAK.bits();
pub const V: u8 = StatusFlags::OVERFLOW.bits();
pub const N: u8 = StatusFlags::NEGATIVE.bits();

/// Runs `program` starting at [`LOAD_ADDRESS`] until a `CpuFault` halts
/// it (an undefined opcode, appended automatically as a terminator the
/// way the teacher repo appended `OpCode::KIL`).
pub fn run_program(program: &[u8]) -> Cpu<FlatMemory> {
    let mut bytes = program.to_vec();
    bytes.push(0x02); // undefined opcode: halts the loop below.

    let mut memory = FlatMemory::new();
    memory.load(LOAD_ADDRESS, &bytes);
    let mut cpu = Cpu::new(memory);
    cpu.set_pc(LOAD_ADDRESS);

    loop {
        if cpu.step().is_err() {
            break;
        }
    }
    cpu
}

/// Two's complement of a `u8`, for writing negative immediates as
/// `negative(1)` instead of a raw hex literal.
pub fn negative(n: u8) -> u8 {
    (!n).wrapping_add(1)
}

pub fn assert_register_a(program: &[u8], value: u8, status: u8) {
    let cpu = run_program(program);
    assert_eq!(cpu.a(), value, "register A");
    assert_status(&cpu, status);
}

pub fn assert_register_x(program: &[u8], value: u8, status: u8) {
    let cpu = run_program(program);
    assert_eq!(cpu.x(), value, "register X");
    assert_status(&cpu, status);
}

pub fn assert_register_y(program: &[u8], value: u8, status: u8) {
    let cpu = run_program(program);
    assert_eq!(cpu.y(), value, "register Y");
    assert_status(&cpu, status);
}

pub fn assert_status(cpu: &Cpu<FlatMemory>, value: u8) {
    use pretty_assertions::assert_eq;
    assert_eq!(
        format!("{:08b}", cpu.p()),
        format!("{:08b}", value),
        "status flags (NV-BDIZC)"
    );
}

#[macro_export]
macro_rules! register_a {
    ($name:ident, $a:expr, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register_a($program, $a, $p);
        }
    };
}

#[macro_export]
macro_rules! register_x {
    ($name:ident, $x:expr, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register_x($program, $x, $p);
        }
    };
}

#[macro_export]
macro_rules! register_y {
    ($name:ident, $y:expr, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register_y($program, $y, $p);
        }
    };
}

#[macro_export]
macro_rules! status {
    ($name:ident, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            let cpu = run_program($program);
            assert_status(&cpu, $p);
        }
    };
}
