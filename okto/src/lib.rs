//! CHIP-8 virtual machine core.
//!
//! The machine is driven one instruction per tick by a host loop. All
//! host concerns (windowing, input polling, file IO) live behind the
//! [`frontend::Frontend`] collaborator trait.
mod clock;
pub mod constants;
mod error;
mod framebuffer;
mod frontend;
mod instruction;
mod keypad;
mod memory;
mod registers;
mod vm;

pub use self::vm::Hz;

pub mod prelude {
    pub use super::{
        error::{VmError, VmResult},
        framebuffer::Framebuffer,
        frontend::{Frontend, InputEvent},
        instruction::{decode, Instruction},
        keypad::{InvalidKey, Key, Keypad},
        memory::Memory,
        registers::Registers,
        vm::{State, Vm, VmConf},
    };
}
