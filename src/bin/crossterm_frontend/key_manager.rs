use super::key_state::KeypadState;
use crossterm::event::{read, Event, KeyCode};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How long a press event keeps its key held from the interpreter's
/// point of view. Long enough to bridge the terminal's auto-repeat gap.
const KEY_TIMEOUT: Duration = Duration::from_millis(250);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
///
/// The listener thread is deliberately detached: it blocks in `read()`
/// between events, so joining it could stall until one more keypress.
/// Dropping the manager raises the stop flag and lets the thread run out
/// on its own (or die with the process).
pub struct KeyManager {
    stop: Arc<Mutex<bool>>,
    keypad: Arc<KeypadState>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(Mutex::new(false));
        let keypad = Arc::new(KeypadState::new(KEY_TIMEOUT));
        spawn_event_listener(stop.clone(), keypad.clone());
        KeyManager { stop, keypad }
    }

    pub fn keypad(&self) -> &KeypadState {
        &self.keypad
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop after its next event
        *self.stop.lock().unwrap() = true;
    }
}

/// Starts a detached thread that listens for key events and records them
/// on the keypad.
fn spawn_event_listener(stop: Arc<Mutex<bool>>, keypad: Arc<KeypadState>) {
    thread::spawn(move || {
        loop {
            let event = read().unwrap();
            log::debug!("Got event {:?}", event);

            // Check the shared data, and possibly stop
            if *stop.lock().unwrap() {
                break;
            }

            // Investigate the event
            match event {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Esc => {
                        keypad.request_quit();
                        break;
                    }
                    KeyCode::Char(c) => {
                        if let Some(code) = char_to_keypad(c) {
                            keypad.press(code);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    });
}

/// The conventional QWERTY layout for the 4x4 hex keypad:
/// `1234`/`qwer`/`asdf`/`zxcv` map to the machine's sixteen keys.
fn char_to_keypad(c: char) -> Option<u8> {
    let code = match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn keypad_layout_covers_all_sixteen_keys() {
        let mut codes: Vec<u8> = "1234qwerasdfzxcv"
            .chars()
            .filter_map(char_to_keypad)
            .collect();
        codes.sort();
        assert_eq!(codes, (0..16).collect::<Vec<u8>>());
        assert_eq!(char_to_keypad('p'), None);
    }

    // The listener may be blocked in read() with no events coming;
    // dropping must not wait for it.
    #[test]
    fn dropping_the_manager_does_not_block() {
        let manager = KeyManager::new();
        drop(manager);
    }
}
