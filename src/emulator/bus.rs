use crate::emulator::error::EmulatorError;
use crate::emulator::input::Input;
use crate::emulator::memory::Memory;
use crate::emulator::output::Screen;
use crate::emulator::quirks::{Quirks, SysType};
use crate::emulator::sound::Audio;
use crate::emulator::video::Framebuffer;

/// The sole mediator between the CPU and every peripheral.
///
/// Owns memory and the framebuffer, and holds the input, screen and audio
/// backends. Nothing else in the core touches any of these directly.
pub struct Bus<I, S, A> {
    memory: Memory,
    framebuffer: Framebuffer,
    input: I,
    screen: S,
    audio: A,
    tone_requested: bool,
}

impl<I: Input, S: Screen, A: Audio> Bus<I, S, A> {
    pub fn new(target: SysType, input: I, mut screen: S, audio: A) -> Bus<I, S, A> {
        let quirks = Quirks::for_target(target);
        let framebuffer = Framebuffer::new(target, quirks.wrap_sprite_pixels);
        screen.set_resolution(framebuffer.width(), framebuffer.height());
        Bus {
            memory: Memory::new(),
            framebuffer,
            input,
            screen,
            audio,
            tone_requested: false,
        }
    }

    pub fn read_ram(&self, addr: u16) -> Result<u8, EmulatorError> {
        self.memory.read(addr as usize)
    }

    pub fn write_ram(&mut self, addr: u16, val: u8) -> Result<(), EmulatorError> {
        self.memory.write(addr as usize, val)
    }

    pub fn blank_screen(&mut self) {
        self.framebuffer.blank();
        self.screen.blank();
    }

    pub fn set_video_mode(&mut self, high_res: bool) {
        self.framebuffer.set_mode(high_res);
    }

    /// Read a sprite out of memory and blit it. `len` is the row count,
    /// except that 16 requests the SUPERCHIP 16x16 sprite (32 bytes).
    /// Returns the collision flag.
    pub fn copy_sprite(&mut self, x: u8, y: u8, addr: u16, len: u8) -> Result<bool, EmulatorError> {
        let mut sprite = [0u8; 32];
        let count = if len == 16 { 32 } else { len as usize };
        for (offset, byte) in sprite[..count].iter_mut().enumerate() {
            *byte = self.memory.read(addr as usize + offset)?;
        }
        if len == 16 {
            Ok(self.framebuffer.draw_wide_sprite(x, y, &sprite))
        } else {
            Ok(self.framebuffer.draw_sprite(x, y, &sprite[..count]))
        }
    }

    pub fn test_key(&self, code: u8) -> bool {
        self.input.is_key_down(code)
    }

    pub fn get_key(&self) -> Option<u8> {
        self.input.last_key_down()
    }

    pub fn exit_requested(&self) -> bool {
        self.input.wants_exit()
    }

    /// Keep the speaker audible for the current frame. Silence is the
    /// default; the request is consumed by the next `clock_bus`.
    pub fn request_tone(&mut self) {
        self.tone_requested = true;
    }

    /// Per-frame housekeeping: poll input, push the framebuffer to the
    /// screen, and feed the speaker one tick of tone or silence.
    pub fn clock_bus(&mut self) {
        self.input.poll_events();
        self.framebuffer.update(&mut self.screen);
        self.audio.tick(!self.tone_requested);
        self.tone_requested = false;
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}
