use crate::emulator::bus::Bus;
use crate::emulator::error::EmulatorError;
use crate::emulator::input::Input;
use crate::emulator::instruction::{Addr, Const, Instruction, Reg};
use crate::emulator::output::Screen;
use crate::emulator::quirks::{Quirks, SysType};
use crate::emulator::sound::Audio;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_REGISTERS: usize = 16;
const STACK_SIZE: usize = 16;
const PC_START: u16 = 0x200;
/// Sound timer value loaded when FX0A captures a key, so the frame loop
/// emits a short key-click.
const KEY_CLICK_TICKS: u8 = 4;

/// The interpreter proper: registers, call stack, timers, and the
/// fetch-decode-execute state machine.
///
/// One instruction runs per `clock_sys` call; `clock_60hz` drives the two
/// timer registers and releases the draw-to-vblank latch. Everything
/// outside the register file goes through the [`Bus`].
pub struct Cpu {
    registers: [u8; NUM_REGISTERS],
    stack: [u16; STACK_SIZE],
    stack_pointer: u8,
    program_counter: u16,
    i: u16,
    delay_timer: u8,
    sound_timer: u8,
    quirks: Quirks,
    /// Set by a sprite draw; blocks execution until the next 60 Hz tick,
    /// like the original hardware's one-draw-per-refresh restriction.
    vblank_wait: bool,
    /// The key captured by FX0A, kept while it remains held.
    held_key: Option<u8>,
    rng: StdRng,
}

impl Cpu {
    pub fn new(target: SysType) -> Cpu {
        Cpu::with_rng(target, StdRng::from_entropy())
    }

    /// A CPU with a deterministic random sequence, for tests.
    pub fn with_seed(target: SysType, seed: u64) -> Cpu {
        Cpu::with_rng(target, StdRng::seed_from_u64(seed))
    }

    fn with_rng(target: SysType, rng: StdRng) -> Cpu {
        Cpu {
            registers: [0; NUM_REGISTERS],
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
            program_counter: PC_START,
            i: 0,
            delay_timer: 0,
            sound_timer: 0,
            quirks: Quirks::for_target(target),
            vblank_wait: false,
            held_key: None,
            rng,
        }
    }

    /// Zero all registers and timers, empty the stack, and point the
    /// program counter back at the program start.
    pub fn reset(&mut self) {
        self.registers = [0; NUM_REGISTERS];
        self.stack = [0; STACK_SIZE];
        self.stack_pointer = 0;
        self.program_counter = PC_START;
        self.i = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.vblank_wait = false;
        self.held_key = None;
    }

    /// One fetch-decode-execute cycle, suppressed entirely while waiting
    /// for the display refresh.
    pub fn clock_sys<I, S, A>(&mut self, bus: &mut Bus<I, S, A>) -> Result<(), EmulatorError>
    where
        I: Input,
        S: Screen,
        A: Audio,
    {
        if self.vblank_wait {
            return Ok(());
        }
        let left = bus.read_ram(self.program_counter)?;
        let right = bus.read_ram(self.program_counter + 1)?;
        let instruction = Instruction::from_two_u8(left, right);
        log::trace!("{:#06x}: {:?}", self.program_counter, instruction);

        // Instructions that repeat or jump adjust this themselves.
        self.program_counter += 2;

        self.execute(instruction, bus)
    }

    /// Tick the two timer registers (they floor at zero) and release a
    /// draw-blocked CPU. Call at 60 Hz.
    pub fn clock_60hz(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
        self.vblank_wait = false;
    }

    /// Ask the bus for tone while the sound timer runs. Call once per
    /// instruction cycle so requests are dense enough for the frame-rate
    /// audio tick.
    pub fn clock_sound<I, S, A>(&mut self, bus: &mut Bus<I, S, A>)
    where
        I: Input,
        S: Screen,
        A: Audio,
    {
        if self.sound_timer > 0 {
            bus.request_tone();
        }
    }

    fn execute<I, S, A>(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus<I, S, A>,
    ) -> Result<(), EmulatorError>
    where
        I: Input,
        S: Screen,
        A: Audio,
    {
        match instruction {
            Instruction::ClearScreen => {
                bus.blank_screen();
            }

            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(EmulatorError::StackUnderflow {
                        pc: self.program_counter - 2,
                    });
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize];
            }

            // The hi-res toggles only exist on SUPERCHIP; elsewhere they
            // are ignored like the RCA 1802 machine-code calls.
            Instruction::LowRes => {
                if self.quirks.has_hires {
                    bus.set_video_mode(false);
                } else {
                    log::debug!("ignoring 00FE on a target without hi-res");
                }
            }

            Instruction::HighRes => {
                if self.quirks.has_hires {
                    bus.set_video_mode(true);
                } else {
                    log::debug!("ignoring 00FF on a target without hi-res");
                }
            }

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize == STACK_SIZE {
                    return Err(EmulatorError::StackOverflow {
                        pc: self.program_counter - 2,
                    });
                }
                self.stack[self.stack_pointer as usize] = self.program_counter;
                self.stack_pointer += 1;
                self.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                if self.registers[x as usize] == n {
                    self.program_counter += 2;
                }
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                if self.registers[x as usize] != n {
                    self.program_counter += 2;
                }
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                if self.registers[x as usize] == self.registers[y as usize] {
                    self.program_counter += 2;
                }
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
                if self.quirks.logic_ops_reset_vf {
                    self.registers[0xF] = 0;
                }
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
                if self.quirks.logic_ops_reset_vf {
                    self.registers[0xF] = 0;
                }
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
                if self.quirks.logic_ops_reset_vf {
                    self.registers[0xF] = 0;
                }
            }

            // VF may be the destination register; the flag supersedes the
            // result, so it is written last.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carried) =
                    self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.registers[x as usize] = sum;
                self.registers[0xF] = carried as u8;
            }

            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let no_borrow = self.registers[x as usize] >= self.registers[y as usize];
                self.registers[x as usize] =
                    self.registers[x as usize].wrapping_sub(self.registers[y as usize]);
                self.registers[0xF] = no_borrow as u8;
            }

            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                if self.quirks.shift_copies_y {
                    self.registers[x as usize] = self.registers[y as usize];
                }
                let lsb = self.registers[x as usize] & 0x1;
                self.registers[x as usize] >>= 1;
                self.registers[0xF] = lsb;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let no_borrow = self.registers[y as usize] >= self.registers[x as usize];
                self.registers[x as usize] =
                    self.registers[y as usize].wrapping_sub(self.registers[x as usize]);
                self.registers[0xF] = no_borrow as u8;
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                if self.quirks.shift_copies_y {
                    self.registers[x as usize] = self.registers[y as usize];
                }
                let msb = self.registers[x as usize] >> 7;
                self.registers[x as usize] <<= 1;
                self.registers[0xF] = msb;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                if self.registers[x as usize] != self.registers[y as usize] {
                    self.program_counter += 2;
                }
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::JumpOffset(Reg(x), Addr(addr)) => {
                self.program_counter = if self.quirks.jump_offset_uses_vx {
                    self.registers[x as usize] as u16 + (addr & 0xFF)
                } else {
                    self.registers[0] as u16 + addr
                };
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(n)) => {
                let rows = if n == 0 && self.quirks.wide_sprites { 16 } else { n };
                let collided = bus.copy_sprite(
                    self.registers[x as usize],
                    self.registers[y as usize],
                    self.i,
                    rows,
                )?;
                self.registers[0xF] = collided as u8;
                self.vblank_wait = true;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                if bus.test_key(self.registers[x as usize]) {
                    self.program_counter += 2;
                }
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                if !bus.test_key(self.registers[x as usize]) {
                    self.program_counter += 2;
                }
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            Instruction::SetRegToGetKey(Reg(x)) => {
                self.wait_for_key(x, bus);
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.registers[x as usize];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.registers[x as usize];
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.registers[x as usize] as u16);
            }

            // Each built-in hex digit sprite is five bytes, starting at 0.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = self.registers[x as usize] as u16 * 5;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.registers[x as usize];
                bus.write_ram(self.i, value / 100)?;
                bus.write_ram(self.i + 1, (value / 10) % 10)?;
                bus.write_ram(self.i + 2, value % 10)?;
            }

            Instruction::RegDump(Reg(x)) => {
                for offset in 0..=x as u16 {
                    bus.write_ram(self.i + offset, self.registers[offset as usize])?;
                }
                self.i += self.save_load_advance(x);
            }

            Instruction::RegLoad(Reg(x)) => {
                for offset in 0..=x as u16 {
                    self.registers[offset as usize] = bus.read_ram(self.i + offset)?;
                }
                self.i += self.save_load_advance(x);
            }

            Instruction::Unknown(opcode) => {
                log::warn!("Unknown opcode {:#06x}, skipping", opcode);
            }
        };
        Ok(())
    }

    /// How far FX55/FX65 move I: past the last register on the classic
    /// interpreter, one short of that on the HP48 family.
    fn save_load_advance(&self, x: u8) -> u16 {
        if self.quirks.save_load_increments_i_by_x_plus_one {
            x as u16 + 1
        } else {
            x as u16
        }
    }

    /// FX0A: repeat until a key goes down, record it into VX, keep
    /// repeating while it stays held (with a key-click on the sound
    /// timer), and advance only once it is released.
    fn wait_for_key<I, S, A>(&mut self, x: u8, bus: &mut Bus<I, S, A>)
    where
        I: Input,
        S: Screen,
        A: Audio,
    {
        match self.held_key {
            None => {
                match bus.get_key() {
                    Some(key) => {
                        self.registers[x as usize] = key;
                        self.sound_timer = KEY_CLICK_TICKS;
                        self.held_key = Some(key);
                    }
                    None => {}
                }
                self.program_counter -= 2;
            }
            Some(key) => {
                if bus.test_key(key) {
                    self.program_counter -= 2;
                } else {
                    self.held_key = None;
                }
            }
        }
    }
}
