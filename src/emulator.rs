//! The interpreter core: CPU, bus, memory, video, and the traits the
//! frontends plug into.

pub mod bus;
pub mod cpu;
pub mod error;
pub mod input;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod output;
pub mod quirks;
pub mod rom;
pub mod sound;
pub mod video;

pub use bus::Bus;
pub use cpu::Cpu;
pub use error::EmulatorError;
pub use machine::Machine;
pub use quirks::SysType;
