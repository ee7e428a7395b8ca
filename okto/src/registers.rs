//! Register file, timers and the return-address stack.
use crate::{
    constants::*,
    error::{VmError, VmResult},
};

/// Register state for the machine.
pub struct Registers {
    /// Program counter pointing to the next instruction in memory.
    pub pc: usize,
    /// Stack pointer, indicating the top of the return-address stack.
    /// Slot 0 is a sentinel and never holds a return address.
    pub sp: usize,
    /// General purpose registers for temporary values.
    ///
    /// Register 16 (VF) is used for either the carry flag or borrow
    /// switch depending on opcode.
    pub v: [u8; REGISTER_COUNT],
    /// Index register used for temporarily storing an address. Since
    /// addresses are 12 bits, only the lowest (rightmost) bits are used.
    pub i: Address,
    /// (DT) Delay timer that counts down to 0.
    pub delay: u8,
    /// (ST) Sound timer that counts down to 0. While it has a non-zero
    /// value a tone is meant to play; the machine only tracks the counter.
    pub sound: u8,
    /// Return addresses for nested subroutine calls.
    stack: [Address; STACK_SIZE],
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            pc: ROM_START,
            sp: 0,
            v: [0; REGISTER_COUNT],
            i: 0,
            delay: 0,
            sound: 0,
            stack: [0; STACK_SIZE],
        }
    }
}

impl Registers {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reset all register state for a fresh program start.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Jump to a subroutine, remembering the current program counter.
    ///
    /// The stack pointer is incremented before the slot is written.
    /// Nesting deeper than the stack allows is a fatal fault.
    pub fn call(&mut self, addr: Address) -> VmResult<()> {
        if self.sp >= STACK_SIZE - 1 {
            return Err(VmError::StackOverflow);
        }
        self.sp += 1;
        self.stack[self.sp] = self.pc as Address & ADDRESS_MASK;
        self.pc = (addr & ADDRESS_MASK) as usize;
        Ok(())
    }

    /// Return from a subroutine to the address on top of the stack.
    ///
    /// Returning with the stack pointer at the sentinel slot is a
    /// fatal fault.
    pub fn ret(&mut self) -> VmResult<()> {
        if self.sp == 0 {
            return Err(VmError::StackUnderflow);
        }
        self.pc = self.stack[self.sp] as usize;
        self.sp -= 1;
        Ok(())
    }

    /// Count down the delay and sound timers, clamping at zero.
    #[inline]
    pub fn tick_timers(&mut self) {
        // The checked_sub implementation uses `unlikely!()` which degrades performance.
        let (delay, underflow) = self.delay.overflowing_sub(1);
        if !underflow {
            self.delay = delay;
        }
        let (sound, underflow) = self.sound.overflowing_sub(1);
        if !underflow {
            self.sound = sound;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_call_then_ret_restores_pc() {
        let mut regs = Registers::new();
        regs.pc = 0x202;

        regs.call(0x400).unwrap();
        assert_eq!(regs.pc, 0x400);
        assert_eq!(regs.sp, 1);

        regs.ret().unwrap();
        assert_eq!(regs.pc, 0x202);
        assert_eq!(regs.sp, 0);
    }

    #[test]
    fn test_call_overflow() {
        let mut regs = Registers::new();

        // 15 levels of nesting fit.
        for _ in 0..STACK_SIZE - 1 {
            regs.call(0x300).unwrap();
        }
        assert_eq!(regs.sp, STACK_SIZE - 1);

        let err = regs.call(0x300).unwrap_err();
        assert!(matches!(err, VmError::StackOverflow));
    }

    #[test]
    fn test_ret_underflow() {
        let mut regs = Registers::new();
        let err = regs.ret().unwrap_err();
        assert!(matches!(err, VmError::StackUnderflow));
    }

    #[test]
    fn test_timers_clamp_at_zero() {
        let mut regs = Registers::new();
        regs.delay = 2;
        regs.sound = 1;

        for _ in 0..10 {
            regs.tick_timers();
        }

        assert_eq!(regs.delay, 0);
        assert_eq!(regs.sound, 0);
    }
}
