/// A source of CHIP-8 keypad state: sixteen logical keys (`0x0..=0xF`)
/// plus a user quit signal. How those map to physical keys is up to the
/// implementation.
pub trait Input {
    /// Drain pending backend events, updating the pressed state and the
    /// quit flag. Called once per frame tick.
    fn poll_events(&mut self);

    /// Whether the given logical key is currently held.
    fn is_key_down(&self, code: u8) -> bool;

    /// The most recently pressed key, if one is still held.
    fn last_key_down(&self) -> Option<u8>;

    /// Whether the user asked to quit the emulator.
    fn wants_exit(&self) -> bool;
}

/// An input device with no keys and no way to quit.
pub struct NullInput;

impl Input for NullInput {
    fn poll_events(&mut self) {}
    fn is_key_down(&self, _: u8) -> bool {
        false
    }
    fn last_key_down(&self) -> Option<u8> {
        None
    }
    fn wants_exit(&self) -> bool {
        false
    }
}
