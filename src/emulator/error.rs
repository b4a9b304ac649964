use thiserror::Error;

/// Faults that end execution of the loaded program.
///
/// Invalid opcodes are deliberately absent: real interpreters shrugged them
/// off, so they are logged and skipped instead of surfaced here.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// A `CALL` was executed with all stack slots in use.
    #[error("call stack overflow at {pc:#05x}")]
    StackOverflow { pc: u16 },

    /// A `RET` was executed with an empty call stack.
    #[error("return with an empty call stack at {pc:#05x}")]
    StackUnderflow { pc: u16 },

    /// An access outside the 4KB address space. Silent wraparound would
    /// mask interpreter bugs, so this fails fast instead.
    #[error("memory access out of bounds at {addr:#05x}")]
    OutOfBounds { addr: usize },

    /// The ROM image contained no bytes.
    #[error("rom image is empty")]
    EmptyRom,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
