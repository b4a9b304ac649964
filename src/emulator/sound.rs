/// A speaker fed one frame of tone or silence per call.
pub trait Audio {
    /// Emit one frame's worth of the fixed-frequency tone, or silence
    /// when `mute` is set. Silence is the common case; the bus only
    /// unmutes for frames in which the sound timer was running.
    fn tick(&mut self, mute: bool);
}

/// A speaker that stays quiet.
pub struct NullAudio;

impl Audio for NullAudio {
    fn tick(&mut self, _: bool) {}
}
