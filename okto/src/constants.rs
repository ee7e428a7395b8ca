//! Constant values of the CHIP-8 architecture.

/// Number of general purpose registers.
pub const REGISTER_COUNT: usize = 0x10; // 16

/// Size of the flat byte-addressable memory.
pub const MEM_SIZE: usize = 0x1000; // 4096

/// Programs are loaded at this address, with the lower memory space
/// historically reserved for the interpreter itself.
pub const ROM_START: usize = 0x200; // 512

/// Levels of nesting allowed in the call stack.
///
/// Slot 0 is a sentinel for the empty stack, leaving
/// 15 usable return-address slots.
pub const STACK_SIZE: usize = 0x10; // 16

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_BUFFER_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Sprites are bit-packed rows, 8 pixels wide.
pub const SPRITE_WIDTH: usize = 8;

/// Maximum sprite height encodable in the draw instruction's 4-bit operand.
pub const SPRITE_MAX_HEIGHT: usize = 0xF;

/// Address where the builtin font glyphs are loaded.
pub const FONT_START: usize = 0x50;

/// Height in bytes of one font glyph.
pub const FONT_HEIGHT: usize = 5;

/// Builtin font table. One glyph per hexadecimal digit, each glyph
/// five rows of 8 pixels with only the high nibble in use.
#[rustfmt::skip]
pub const FONT_DATA: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Number of clock cycles in a second that the machine is ticked,
/// which is also the rate the delay and sound timers count down.
pub const TICK_FREQUENCY: u64 = 60;

/// Number of nanoseconds in a second
#[doc(hidden)]
pub const NANOS_IN_SECOND: u64 = 1_000_000_000;

/// Number of keys on the keypad (0x0-0xF)
pub const KEY_COUNT: u8 = 16;

/// Mask for the 12-bit memory addresses.
pub const ADDRESS_MASK: u16 = 0xFFF;

/// Type for storing the 12-bit memory addresses.
pub type Address = u16;
