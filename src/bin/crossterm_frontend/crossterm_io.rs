use chippy8::emulator::{input::Input, output::Screen};

use super::key_manager::KeyManager;

use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use std::io::{stdout, Write};

pub struct CrosstermInput<'a> {
    key_manager: &'a KeyManager,
}

impl CrosstermInput<'_> {
    pub fn new(key_manager: &KeyManager) -> CrosstermInput {
        CrosstermInput { key_manager }
    }
}

impl Input for CrosstermInput<'_> {
    // The key manager's listener thread does the actual polling.
    fn poll_events(&mut self) {}

    fn is_key_down(&self, code: u8) -> bool {
        self.key_manager.keypad().is_down(code)
    }

    fn last_key_down(&self) -> Option<u8> {
        self.key_manager.keypad().last_down()
    }

    fn wants_exit(&self) -> bool {
        self.key_manager.keypad().quit_requested()
    }
}

/// Renders the pixel grid into the terminal, two characters per pixel so
/// cells come out roughly square. Only cells that changed since the last
/// frame are redrawn.
pub struct CrosstermScreen {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CrosstermScreen {
    pub fn new() -> crossterm::Result<CrosstermScreen> {
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(CrosstermScreen {
            width: 0,
            height: 0,
            cells: Vec::new(),
        })
    }

    fn draw_border(&self) {
        let bottom = self.height + 2;
        let right = 2 * self.width + 3;
        for y in 1..=bottom {
            for x in 1..=right {
                if y == 1 || y == bottom || x == 1 || x == right {
                    let c = if y == 1 && x == 1 {
                        '┏'
                    } else if y == 1 && x == right {
                        '┓'
                    } else if y == bottom && x == 1 {
                        '┗'
                    } else if y == bottom && x == right {
                        '┛'
                    } else if y == 1 || y == bottom {
                        '━'
                    } else {
                        '┃'
                    };
                    let _ = execute!(stdout(), cursor::MoveTo(x as u16, y as u16));
                    let _ = write!(stdout(), "{}", c);
                }
            }
        }
        let _ = stdout().flush();
    }

    fn draw(&mut self, x: usize, y: usize, lit: bool) {
        let _ = execute!(stdout(), cursor::MoveTo(2 * x as u16 + 2, y as u16 + 2));
        let _ = write!(stdout(), "{}", if lit { "██" } else { "  " });
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

impl Screen for CrosstermScreen {
    fn set_resolution(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![false; width * height];
        let _ = execute!(stdout(), Clear(ClearType::All));
        self.draw_border();
    }

    fn blank(&mut self) {
        for cell in &mut self.cells {
            *cell = false;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                self.draw(x, y, false);
            }
        }
        let _ = stdout().flush();
    }

    fn copy_screen(&mut self, pixels: &[bool], width: usize, height: usize) {
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                let offset = y * width + x;
                if self.cells[y * self.width + x] != pixels[offset] {
                    self.cells[y * self.width + x] = pixels[offset];
                    self.draw(x, y, pixels[offset]);
                }
            }
        }
    }

    fn refresh(&mut self) {
        let _ = stdout().flush();
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    // The constructor reports terminal-setup failures in crossterm's own
    // error type; check it stays boxable the way main consumes it. Never
    // called, since tests have no terminal to take over.
    #[test]
    fn screen_setup_error_is_boxable() {
        fn boxes<T, E: Into<Box<dyn std::error::Error>>>(_: fn() -> Result<T, E>) {}
        boxes(CrosstermScreen::new);
    }
}
