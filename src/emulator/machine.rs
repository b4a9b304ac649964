use crate::emulator::bus::Bus;
use crate::emulator::cpu::Cpu;
use crate::emulator::error::EmulatorError;
use crate::emulator::input::Input;
use crate::emulator::output::Screen;
use crate::emulator::quirks::SysType;
use crate::emulator::rom::Rom;
use crate::emulator::sound::Audio;
use std::path::Path;
use std::time::{Duration, Instant};

const PROGRAM_START: u16 = 0x200;
/// One display frame at 60 Hz, rounded down to whole milliseconds like
/// most terminal-based interpreters do.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// One instruction every 2 ms, about 500 per second.
const MICROS_PER_CYCLE: u128 = 2_000;

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// A complete interpreter: CPU wired to a bus, with the hex font loaded
/// and a wall-clock run loop.
pub struct Machine<I, S, A> {
    bus: Bus<I, S, A>,
    cpu: Cpu,
}

impl<I: Input, S: Screen, A: Audio> Machine<I, S, A> {
    pub fn new(target: SysType, input: I, screen: S, audio: A) -> Machine<I, S, A> {
        let mut bus = Bus::new(target, input, screen, audio);
        for (addr, &byte) in FONT.iter().enumerate() {
            // The font fits well below 0x200, so this cannot fail.
            let _ = bus.write_ram(addr as u16, byte);
        }
        Machine {
            bus,
            cpu: Cpu::new(target),
        }
    }

    /// Stream a ROM file into memory at the program start address.
    pub fn load_program<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EmulatorError> {
        let mut rom = Rom::open(path)?;
        let mut addr = PROGRAM_START;
        while !rom.at_eof() {
            for byte in rom.read_next_chunk()? {
                self.bus.write_ram(addr, byte)?;
                addr += 1;
            }
        }
        log::info!("loaded {} bytes of program", addr - PROGRAM_START);
        Ok(())
    }

    /// Load a program already in memory, mainly for tests and doctests.
    pub fn load(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        if program.is_empty() {
            return Err(EmulatorError::EmptyRom);
        }
        for (offset, &byte) in program.iter().enumerate() {
            self.bus.write_ram(PROGRAM_START + offset as u16, byte)?;
        }
        Ok(())
    }

    /// Execute one instruction and one frame's worth of housekeeping.
    /// Useful for headless, deterministic stepping.
    pub fn step(&mut self) -> Result<(), EmulatorError> {
        self.cpu.clock_sys(&mut self.bus)?;
        self.cpu.clock_sound(&mut self.bus);
        self.bus.clock_bus();
        self.cpu.clock_60hz();
        Ok(())
    }

    /// Run until the input backend asks to quit.
    ///
    /// Instructions are paced against the wall clock at roughly 500 per
    /// second, with display, input and timers serviced once per 60 Hz
    /// frame. Sleeping is delegated to `spin_sleep` so short frame gaps
    /// are kept accurately.
    pub fn run(&mut self) -> Result<(), EmulatorError> {
        let mut frame_start = Instant::now();
        loop {
            let cycles = frame_start.elapsed().as_micros() / MICROS_PER_CYCLE;
            for _ in 0..cycles {
                self.cpu.clock_sys(&mut self.bus)?;
                self.cpu.clock_sound(&mut self.bus);
            }

            self.bus.clock_bus();
            self.cpu.clock_60hz();
            if self.bus.exit_requested() {
                log::info!("exit requested, shutting down");
                return Ok(());
            }

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_INTERVAL {
                spin_sleep::sleep(FRAME_INTERVAL - elapsed);
            }
            frame_start = Instant::now();
        }
    }

    /// Back to power-on state, program and font left in memory.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.blank_screen();
    }

    pub fn bus(&self) -> &Bus<I, S, A> {
        &self.bus
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::input::NullInput;
    use crate::emulator::output::NullScreen;
    use crate::emulator::sound::NullAudio;

    fn machine() -> Machine<NullInput, NullScreen, NullAudio> {
        Machine::new(SysType::Chip8, NullInput, NullScreen, NullAudio)
    }

    #[test]
    fn loads_bytes_at_the_program_start() {
        let mut machine = machine();
        machine.load(&[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(machine.bus.read_ram(0x200).unwrap(), 0xAA);
        assert_eq!(machine.bus.read_ram(0x201).unwrap(), 0xBB);
        assert_eq!(machine.bus.read_ram(0x202).unwrap(), 0xCC);
    }

    #[test]
    fn loading_leaves_the_font_area_alone() {
        let mut machine = machine();
        let before: Vec<u8> = (0..0x200)
            .map(|addr| machine.bus.read_ram(addr).unwrap())
            .collect();
        machine.load(&[0xFF; 64]).unwrap();
        let after: Vec<u8> = (0..0x200)
            .map(|addr| machine.bus.read_ram(addr).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_program_is_rejected() {
        let mut machine = machine();
        assert!(matches!(machine.load(&[]), Err(EmulatorError::EmptyRom)));
    }

    #[test]
    fn font_is_loaded_at_zero() {
        let machine = machine();
        assert_eq!(machine.bus.read_ram(0).unwrap(), 0xF0);
        assert_eq!(machine.bus.read_ram(79).unwrap(), 0x80);
        assert_eq!(machine.bus.read_ram(80).unwrap(), 0);
    }

    #[test]
    fn step_executes_one_instruction() {
        let mut machine = machine();
        // 6A42: set VA to 0x42, then draw it as BCD via I.
        machine.load(&[0x6A, 0x42, 0xFA, 0x33]).unwrap();
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(machine.bus.read_ram(0).unwrap(), 0);
        assert_eq!(machine.bus.read_ram(1).unwrap(), 6);
        assert_eq!(machine.bus.read_ram(2).unwrap(), 6);
    }

    #[test]
    fn missing_rom_file_reports_io_error() {
        let mut machine = machine();
        let result = machine.load_program("/definitely/not/a/rom.ch8");
        assert!(matches!(result, Err(EmulatorError::Io(_))));
    }
}
