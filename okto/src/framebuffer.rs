//! Monochrome display buffer.
use crate::constants::*;

/// 64x32 grid of on/off pixels the machine draws sprites into.
///
/// The redraw flag is raised whenever the grid is mutated, and lowered
/// once the renderer collaborator has taken the frame.
pub struct Framebuffer {
    pixels: Box<[bool; DISPLAY_BUFFER_SIZE]>,
    redraw: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: Box::new([false; DISPLAY_BUFFER_SIZE]),
            redraw: false,
        }
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Blank the whole grid.
    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.redraw = true;
    }

    #[inline(always)]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[x + y * DISPLAY_WIDTH]
    }

    /// Row-major view of the whole grid, for blitting to a screen.
    pub fn buffer(&self) -> &[bool; DISPLAY_BUFFER_SIZE] {
        &self.pixels
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Report whether a redraw is due, lowering the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Draw a sprite of bit-packed rows with its origin at (x, y).
    ///
    /// The origin wraps around the grid; the sprite body does not.
    /// Rows are cut off at the right edge and the sprite is cut off at
    /// the bottom edge. A sprite bit landing on a lit pixel clears the
    /// pixel, everything else is drawn as the XOR of sprite bit and
    /// pixel. Returns whether any pixel was cleared this way.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (r, &row) in rows.iter().enumerate() {
            let py = origin_y + r;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            for c in 0..SPRITE_WIDTH {
                let px = origin_x + c;
                if px >= DISPLAY_WIDTH {
                    break;
                }
                let d = px + py * DISPLAY_WIDTH;
                let sprite_bit = (row >> (7 - c)) & 1 != 0;

                if sprite_bit && self.pixels[d] {
                    collision = true;
                    self.pixels[d] = false;
                } else {
                    self.pixels[d] ^= sprite_bit;
                }
            }
        }

        self.redraw = true;
        collision
    }
}
