//! End-to-end tests running small hand-assembled programs.
use okto::constants::*;
use okto::prelude::*;

fn run_rom(rom: &[u8], ticks: usize) -> Vm {
    let mut vm = Vm::new(VmConf::default());
    vm.load_rom(rom).unwrap();
    for _ in 0..ticks {
        vm.tick(&[]).unwrap();
    }
    vm
}

/// A true skip must step over the next instruction, even when that
/// instruction would be a fatal decode error.
#[test]
fn test_skip_over_fatal_opcode() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x05, // LD   v0, 5
        0x70, 0x03, // ADD  v0, 3
        0x30, 0x08, // SE   v0, 8   ; true, skips the next word
        0xFF, 0xFF, // deliberately unreachable garbage
        0x61, 0x01, // LD   v1, 1
    ];
    let vm = run_rom(&rom, 4);

    assert_eq!(vm.registers().v[0], 8);
    assert_eq!(vm.registers().v[1], 1, "execution continued past the skip");
    assert_eq!(vm.registers().pc, ROM_START + 10);
}

/// A subroutine call runs its body and returns to the instruction
/// after the call site.
#[test]
fn test_call_and_return() {
    #[rustfmt::skip]
    let rom = [
        0x22, 0x06, // 0x200: CALL 0x206
        0x61, 0x02, // 0x202: LD v1, 2
        0x00, 0x00, // 0x204: (halt padding)
        0x62, 0x07, // 0x206: LD v2, 7
        0x00, 0xEE, // 0x208: RET
    ];
    let vm = run_rom(&rom, 4);

    assert_eq!(vm.registers().v[2], 7, "subroutine body ran");
    assert_eq!(vm.registers().v[1], 2, "returned to the call site");
    assert_eq!(vm.registers().sp, 0);
}

/// Nesting past the stack depth is a fatal fault, not silent
/// corruption.
#[test]
fn test_runaway_recursion_faults() {
    // A subroutine that calls itself forever.
    let rom = [0x22, 0x00]; // 0x200: CALL 0x200
    let mut vm = Vm::new(VmConf::default());
    vm.load_rom(&rom).unwrap();

    let mut result = Ok(());
    for _ in 0..32 {
        result = vm.tick(&[]);
        if result.is_err() {
            break;
        }
    }
    assert!(matches!(result, Err(VmError::StackOverflow)));
}

/// Drawing a glyph, then drawing it again, leaves a blank screen with
/// the collision flag raised.
#[test]
fn test_draw_twice_erases() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x03, // LD  v0, 3
        0xF0, 0x29, // LD  F, v0     ; glyph "3"
        0x61, 0x0A, // LD  v1, 10
        0x62, 0x04, // LD  v2, 4
        0xD1, 0x25, // DRW v1, v2, 5
        0xD1, 0x25, // DRW v1, v2, 5
    ];
    let mut vm = Vm::new(VmConf::default());
    vm.load_rom(&rom).unwrap();

    for _ in 0..5 {
        vm.tick(&[]).unwrap();
    }
    assert!(vm.framebuffer().pixel(10, 4));
    assert_eq!(vm.registers().v[0xF], 0);

    vm.tick(&[]).unwrap();
    assert_eq!(vm.registers().v[0xF], 1);
    for y in 0..DISPLAY_HEIGHT {
        for x in 0..DISPLAY_WIDTH {
            assert!(!vm.framebuffer().pixel(x, y), "pixel ({x}, {y}) left lit");
        }
    }
}

/// The ROM loader refuses programs that do not fit above 0x200.
#[test]
fn test_oversized_rom_rejected() {
    let rom = vec![0u8; MEM_SIZE - ROM_START];
    let mut vm = Vm::new(VmConf::default());
    let err = vm.load_rom(&rom).unwrap_err();
    assert!(matches!(err, VmError::Capacity { .. }));
}

/// The font table is present in memory at its fixed region.
#[test]
fn test_font_loaded_at_startup() {
    let vm = run_rom(&[0x60, 0x00], 0);
    // Glyph "0" starts with row 0xF0; glyph "F" ends with row 0x80.
    assert_eq!(vm.memory().read8(FONT_START), 0xF0);
    assert_eq!(vm.memory().read8(FONT_START + 79), 0x80);
}
