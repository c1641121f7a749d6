//! The processor status register.

use bitflags::bitflags;

bitflags! {
    /// The `P` register, NV-BDIZC from bit 7 down to bit 0.
    ///
    /// Bit 5 (`UNUSED`) has no hardware meaning and always reads back as
    /// 1; bit 4 (`BREAK`) is not a latched flag at all, only a value that
    /// gets forced into the byte pushed by `PHP`/`BRK` to tell the two
    /// apart on the stack. Neither is ever cleared by an ALU/compare
    /// instruction, matching spec.md's "bit 5 always reads as 1" invariant.
    #[derive(Default)]
    pub struct StatusFlags: u8 {
        const CARRY             = 0b0000_0001;
        const ZERO              = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL           = 0b0000_1000;
        const BREAK             = 0b0001_0000;
        const UNUSED            = 0b0010_0000;
        const OVERFLOW          = 0b0100_0000;
        const NEGATIVE          = 0b1000_0000;
    }
}

impl StatusFlags {
    /// The flags set by `reset()` when `ResetOptions::interrupt_disable_on_reset`
    /// is left at its default of `false`: only bit 5, which always reads 1.
    pub fn after_reset(interrupt_disable: bool) -> Self {
        let mut flags = StatusFlags::UNUSED;
        if interrupt_disable {
            flags.insert(StatusFlags::INTERRUPT_DISABLE);
        }
        flags
    }

    /// Updates `ZERO`/`NEGATIVE` from a just-computed result byte. Shared
    /// by every instruction that touches those two flags.
    pub fn set_zero_and_negative(&mut self, value: u8) {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }
}
