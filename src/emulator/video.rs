use crate::emulator::output::Screen;
use crate::emulator::quirks::SysType;

/// The monochrome pixel grid and its sprite blitter.
///
/// Dimensions are fixed by the target variant: 64x32 for Chip8/Chip48,
/// 128x64 for SuperChip10. SuperChip10 starts in pixel-doubled (low
/// resolution) mode so programs written for the classic grid fill the
/// larger one; 00FE/00FF flip that at runtime.
pub struct Framebuffer {
    width: usize,
    height: usize,
    has_hires: bool,
    pixel_doubling: bool,
    wrap_pixels: bool,
    pixels: Vec<bool>,
}

impl Framebuffer {
    pub fn new(target: SysType, wrap_pixels: bool) -> Framebuffer {
        let (width, height) = match target {
            SysType::Chip8 | SysType::Chip48 => (64, 32),
            SysType::SuperChip10 => (128, 64),
        };
        Framebuffer {
            width,
            height,
            has_hires: target == SysType::SuperChip10,
            pixel_doubling: target == SysType::SuperChip10,
            wrap_pixels,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the 128x64 mode is active. A grid without that mode is
    /// never high-res, undoubled or not.
    pub fn is_high_res(&self) -> bool {
        self.has_hires && !self.pixel_doubling
    }

    /// Toggle pixel doubling. In doubled mode every logical pixel is
    /// rendered as a 2x2 block of the full-size grid.
    pub fn set_mode(&mut self, high_res: bool) {
        log::debug!("video mode switched to high_res={}", high_res);
        self.pixel_doubling = !high_res;
    }

    /// Set every pixel to off (the CLS instruction).
    pub fn blank(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = false;
        }
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    /// XOR-blit an 8-pixel-wide sprite, one byte per row, most significant
    /// bit leftmost. Returns true if any lit pixel was turned off.
    ///
    /// The starting coordinate wraps modulo the logical grid; pixels that
    /// then fall off the edge are clipped (or wrapped, for variants that
    /// wrap every pixel).
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let (x, y) = self.wrap_origin(x, y);
        let mut flipped = false;
        for (dy, &row) in rows.iter().enumerate() {
            for bit in 0..8 {
                if row & (0x80 >> bit) != 0 {
                    flipped |= self.plot(x + bit, y + dy);
                }
            }
        }
        flipped
    }

    /// XOR-blit a SUPERCHIP 16x16 sprite: 32 bytes, two per row.
    pub fn draw_wide_sprite(&mut self, x: u8, y: u8, bytes: &[u8; 32]) -> bool {
        let (x, y) = self.wrap_origin(x, y);
        let mut flipped = false;
        for (dy, pair) in bytes.chunks(2).enumerate() {
            let row = ((pair[0] as u16) << 8) | pair[1] as u16;
            for bit in 0..16 {
                if row & (0x8000 >> bit) != 0 {
                    flipped |= self.plot(x + bit, y + dy);
                }
            }
        }
        flipped
    }

    /// Push the grid to the screen backend and make it visible. The only
    /// point where the core touches the display.
    pub fn update<S: Screen>(&self, screen: &mut S) {
        screen.copy_screen(&self.pixels, self.width, self.height);
        screen.refresh();
    }

    /// The grid as seen by sprite coordinates, halved while doubling.
    fn logical_size(&self) -> (usize, usize) {
        if self.pixel_doubling {
            (self.width / 2, self.height / 2)
        } else {
            (self.width, self.height)
        }
    }

    fn wrap_origin(&self, x: u8, y: u8) -> (usize, usize) {
        let (width, height) = self.logical_size();
        (x as usize % width, y as usize % height)
    }

    /// XOR one logical pixel, fanning out to a 2x2 block while doubling.
    /// Returns true if a lit pixel was turned off.
    fn plot(&mut self, x: usize, y: usize) -> bool {
        let (width, height) = self.logical_size();
        let (x, y) = if self.wrap_pixels {
            (x % width, y % height)
        } else if x >= width || y >= height {
            return false;
        } else {
            (x, y)
        };
        if self.pixel_doubling {
            let (bx, by) = (2 * x, 2 * y);
            // Bitwise or: every quadrant must be flipped, short-circuiting
            // would leave the block half-drawn.
            self.flip(bx, by)
                | self.flip(bx + 1, by)
                | self.flip(bx, by + 1)
                | self.flip(bx + 1, by + 1)
        } else {
            self.flip(x, y)
        }
    }

    fn flip(&mut self, x: usize, y: usize) -> bool {
        let offset = y * self.width + x;
        let was_lit = self.pixels[offset];
        self.pixels[offset] = !was_lit;
        was_lit
    }
}
