use std::sync::Mutex;
use std::time::{Duration, Instant};

const NUM_KEYS: usize = 16;

/// A thread-safe view of the hex keypad, fed by a producer of key events
/// and read by the interpreter. Wrap it in an `std::sync::Arc` and you
/// are good to go.
///
/// Terminals only report key presses, never releases, so a key counts as
/// held for a short window after its last press event and "releases" by
/// timing out. Auto-repeat keeps the window fresh while the key is
/// physically down.
pub struct KeypadState {
    timeout: Duration,
    inner: Mutex<Inner>,
}

struct Inner {
    pressed_at: [Option<Instant>; NUM_KEYS],
    last_key: Option<u8>,
    quit: bool,
}

impl KeypadState {
    /// A keypad where presses stay fresh for `timeout`.
    pub fn new(timeout: Duration) -> KeypadState {
        KeypadState {
            timeout,
            inner: Mutex::new(Inner {
                pressed_at: [None; NUM_KEYS],
                last_key: None,
                quit: false,
            }),
        }
    }

    /// Record a press of keypad key `code` (0x0 to 0xF).
    pub fn press(&self, code: u8) {
        let mut inner = self.inner.lock().unwrap();
        inner.pressed_at[code as usize] = Some(Instant::now());
        inner.last_key = Some(code);
    }

    pub fn request_quit(&self) {
        self.inner.lock().unwrap().quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.inner.lock().unwrap().quit
    }

    /// Whether `code` was pressed recently enough to count as held.
    pub fn is_down(&self, code: u8) -> bool {
        let inner = self.inner.lock().unwrap();
        match inner.pressed_at[code as usize] {
            Some(at) => at.elapsed() < self.timeout,
            None => false,
        }
    }

    /// The most recently pressed key, if it still counts as held.
    pub fn last_down(&self) -> Option<u8> {
        let inner = self.inner.lock().unwrap();
        let code = inner.last_key?;
        match inner.pressed_at[code as usize] {
            Some(at) if at.elapsed() < self.timeout => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn press_and_read() {
        let keypad = Arc::new(KeypadState::new(Duration::from_millis(100)));

        let producer_keypad = keypad.clone();
        let producer = thread::spawn(move || producer_keypad.press(0x7));
        producer.join().unwrap();

        assert!(keypad.is_down(0x7));
        assert!(!keypad.is_down(0x8));
        assert_eq!(keypad.last_down(), Some(0x7));
    }

    #[test]
    fn presses_go_stale() {
        let keypad = KeypadState::new(Duration::from_millis(10));
        keypad.press(0x3);
        thread::sleep(Duration::from_millis(20));
        assert!(!keypad.is_down(0x3));
        assert_eq!(keypad.last_down(), None);
    }

    #[test]
    fn quit_flag_sticks() {
        let keypad = KeypadState::new(Duration::from_millis(100));
        assert!(!keypad.quit_requested());
        keypad.request_quit();
        assert!(keypad.quit_requested());
    }
}
