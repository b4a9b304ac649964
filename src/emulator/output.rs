/// Somewhere for the framebuffer to be presented.
///
/// The core pushes the full pixel grid once per frame; scaling and actual
/// rendering belong to the implementation.
pub trait Screen {
    /// Announce the grid dimensions before any pixels arrive. Called at
    /// machine construction.
    fn set_resolution(&mut self, width: usize, height: usize);

    /// Wipe the presented image.
    fn blank(&mut self);

    /// Receive the current pixel grid, row-major, `width * height` entries.
    fn copy_screen(&mut self, pixels: &[bool], width: usize, height: usize);

    /// Make the received grid visible.
    fn refresh(&mut self);
}

/// A screen that swallows everything, for headless runs and tests.
pub struct NullScreen;

impl Screen for NullScreen {
    fn set_resolution(&mut self, _: usize, _: usize) {}
    fn blank(&mut self) {}
    fn copy_screen(&mut self, _: &[bool], _: usize, _: usize) {}
    fn refresh(&mut self) {}
}
