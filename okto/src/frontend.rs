//! Host collaborator interface.
use crate::{framebuffer::Framebuffer, keypad::Key};

/// Input observed by the host windowing layer during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Terminate signal. Stops the machine before any further
    /// instruction executes.
    Quit,
}

/// Hooks the driver loop uses to talk to the host window.
///
/// The machine only ever hands the collaborator a read-only view of
/// the framebuffer, and only reads key events and the quit signal back.
pub trait Frontend {
    /// Drain pending host input into `events`.
    fn poll(&mut self, events: &mut Vec<InputEvent>);

    /// Blit the framebuffer to screen output.
    fn present(&mut self, framebuffer: &Framebuffer);
}
