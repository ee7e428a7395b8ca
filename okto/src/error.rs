//! Result and errors.
use std::fmt::{self, Display, Formatter};

pub type VmResult<T> = std::result::Result<T, VmError>;

/// Faults are fatal: none of these are retried or recovered from,
/// the driver stops the machine when one surfaces.
#[derive(Debug)]
pub enum VmError {
    /// Bulk memory write would run past the end of the 4096-byte store.
    Capacity { offset: usize, len: usize },
    /// Fetched bit pattern is not part of the instruction set.
    UnknownOpcode(u16),
    /// Subroutine calls nested deeper than the return stack allows.
    StackOverflow,
    /// Subroutine return with an empty return stack.
    StackUnderflow,
    Io(std::io::Error),
}

impl Display for VmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity { offset, len } => {
                write!(f, "{len} byte write at offset {offset:#05X} exceeds memory capacity")
            }
            Self::UnknownOpcode(word) => write!(f, "unknown opcode {word:#06X}"),
            Self::StackOverflow => write!(f, "call stack overflow"),
            Self::StackUnderflow => write!(f, "call stack underflow"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for VmError {}

impl From<std::io::Error> for VmError {
    fn from(err: std::io::Error) -> Self {
        VmError::Io(err)
    }
}
