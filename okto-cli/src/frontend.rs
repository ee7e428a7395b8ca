//! SDL2 window, renderer and input polling.
use okto::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use okto::prelude::*;
use sdl2::{
    event::Event, keyboard::Keycode, pixels::Color, rect::Rect, render::WindowCanvas, EventPump,
};

/// Size multiplier for each machine pixel.
const SCALE: u32 = 20;

const BG_COLOR: Color = Color {
    r: 0x00,
    g: 0x00,
    b: 0x00,
    a: 0xFF,
};
const FG_COLOR: Color = Color {
    r: 0xFF,
    g: 0xFF,
    b: 0xFF,
    a: 0xFF,
};

/// Host collaborator backed by an SDL2 window and event pump.
pub struct SdlFrontend {
    canvas: WindowCanvas,
    events: EventPump,
}

impl SdlFrontend {
    pub fn new(title: &str) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video = sdl.video()?;

        let window = video
            .window(
                title,
                DISPLAY_WIDTH as u32 * SCALE,
                DISPLAY_HEIGHT as u32 * SCALE,
            )
            .position_centered()
            .build()
            .map_err(|err| err.to_string())?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|err| err.to_string())?;
        canvas.set_draw_color(BG_COLOR);
        canvas.clear();
        canvas.present();

        let events = sdl.event_pump()?;

        Ok(SdlFrontend { canvas, events })
    }
}

impl Frontend for SdlFrontend {
    fn poll(&mut self, events: &mut Vec<InputEvent>) {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = keymap(keycode) {
                        events.push(InputEvent::KeyDown(key));
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = keymap(keycode) {
                        events.push(InputEvent::KeyUp(key));
                    }
                }
                _ => {}
            }
        }
    }

    fn present(&mut self, framebuffer: &Framebuffer) {
        self.canvas.set_draw_color(BG_COLOR);
        self.canvas.clear();

        self.canvas.set_draw_color(FG_COLOR);
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if framebuffer.pixel(x, y) {
                    let rect = Rect::new(
                        (x as u32 * SCALE) as i32,
                        (y as u32 * SCALE) as i32,
                        SCALE,
                        SCALE,
                    );
                    // Ignore draw errors for individual cells.
                    let _ = self.canvas.fill_rect(rect);
                }
            }
        }

        self.canvas.present();
    }
}

/// Map host keys onto the hexadecimal keypad.
///
/// Digits 0-9 and letters A-F map straight to their hex values. Any
/// other key is ignored.
fn keymap(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Num0 => Some(Key::Key0),
        Keycode::Num1 => Some(Key::Key1),
        Keycode::Num2 => Some(Key::Key2),
        Keycode::Num3 => Some(Key::Key3),
        Keycode::Num4 => Some(Key::Key4),
        Keycode::Num5 => Some(Key::Key5),
        Keycode::Num6 => Some(Key::Key6),
        Keycode::Num7 => Some(Key::Key7),
        Keycode::Num8 => Some(Key::Key8),
        Keycode::Num9 => Some(Key::Key9),
        Keycode::A => Some(Key::KeyA),
        Keycode::B => Some(Key::KeyB),
        Keycode::C => Some(Key::KeyC),
        Keycode::D => Some(Key::KeyD),
        Keycode::E => Some(Key::KeyE),
        Keycode::F => Some(Key::KeyF),
        _ => None,
    }
}
