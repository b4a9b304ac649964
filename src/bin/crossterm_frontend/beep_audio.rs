use beep::beep;
use chippy8::emulator::sound::Audio;

const PITCH_HZ: u16 = 2093; // C

/// Drives the PC speaker through the `beep` crate. The tone is square
/// and monotone, much like the hardware being imitated.
pub struct BeepAudio {
    enabled: bool,
    beeping: bool,
}

impl BeepAudio {
    /// A muted instance never touches the speaker at all, for machines
    /// without one (or users without patience).
    pub fn new(enabled: bool) -> BeepAudio {
        BeepAudio {
            enabled,
            beeping: false,
        }
    }
}

impl Audio for BeepAudio {
    fn tick(&mut self, mute: bool) {
        if !self.enabled || mute == !self.beeping {
            return;
        }
        let result = if mute { beep(0) } else { beep(PITCH_HZ) };
        match result {
            Ok(()) => self.beeping = !mute,
            Err(e) => log::warn!("speaker unavailable: {}", e),
        }
    }
}

impl Drop for BeepAudio {
    fn drop(&mut self) {
        if self.beeping {
            let _ = beep(0);
        }
    }
}
