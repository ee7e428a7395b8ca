//! Instruction decoding.
//!
//! Decoding is a pure function from a 16-bit instruction word to an
//! [`Instruction`], kept separate from execution so both halves can be
//! tested on their own.
use crate::error::{VmError, VmResult};

/// One decoded instruction of the 35-instruction set.
///
/// `x` and `y` select general registers, `n`/`nn`/`nnn` are the 4-bit,
/// 8-bit and 12-bit immediate operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the display.
    ClearScreen,
    /// 00EE: return from a subroutine.
    Return,
    /// 1NNN: jump to address.
    Jump { nnn: u16 },
    /// 2NNN: call subroutine.
    Call { nnn: u16 },
    /// 3XNN: skip next instruction if VX == NN.
    SkipEqByte { x: usize, nn: u8 },
    /// 4XNN: skip next instruction if VX != NN.
    SkipNeByte { x: usize, nn: u8 },
    /// 5XY0: skip next instruction if VX == VY.
    SkipEqReg { x: usize, y: usize },
    /// 6XNN: VX := NN.
    LoadByte { x: usize, nn: u8 },
    /// 7XNN: VX := VX + NN, wrapping, carry flag untouched.
    AddByte { x: usize, nn: u8 },
    /// 8XY0: VX := VY.
    Move { x: usize, y: usize },
    /// 8XY1: VX := VX | VY.
    Or { x: usize, y: usize },
    /// 8XY2: VX := VX & VY.
    And { x: usize, y: usize },
    /// 8XY3: VX := VX ^ VY.
    Xor { x: usize, y: usize },
    /// 8XY4: VX := VX + VY, VF is the carry.
    Add { x: usize, y: usize },
    /// 8XY5: VX := VX - VY, VF set when VX > VY going in.
    Sub { x: usize, y: usize },
    /// 8XY6: VF := low bit of VX, VX := VX >> 1.
    ShiftRight { x: usize },
    /// 8XY7: VX := VY - VX, VF set when VY > VX going in.
    SubNeg { x: usize, y: usize },
    /// 8XYE: VF := high bit of VX, VX := VX << 1.
    ShiftLeft { x: usize },
    /// 9XY0: skip next instruction if VX != VY.
    SkipNeReg { x: usize, y: usize },
    /// ANNN: I := NNN.
    LoadIndex { nnn: u16 },
    /// BNNN: jump to NNN + V0.
    JumpOffset { nnn: u16 },
    /// CXNN: VX := random byte & NN.
    Random { x: usize, nn: u8 },
    /// DXYN: draw an N-row sprite from memory at I to (VX, VY).
    Draw { x: usize, y: usize, n: usize },
    /// EX9E: skip next instruction if key VX is down.
    SkipKeyPressed { x: usize },
    /// EXA1: skip next instruction if key VX is up.
    SkipKeyReleased { x: usize },
    /// FX07: VX := delay timer.
    LoadDelay { x: usize },
    /// FX0A: stall until a key is pressed, store its value in VX.
    WaitKey { x: usize },
    /// FX15: delay timer := VX.
    SetDelay { x: usize },
    /// FX18: sound timer := VX.
    SetSound { x: usize },
    /// FX1E: I := I + VX.
    AddIndex { x: usize },
    /// FX29: I := address of the font glyph for digit VX.
    LoadFont { x: usize },
    /// FX33: store the BCD digits of VX at I, I+1, I+2.
    StoreBcd { x: usize },
    /// FX55: store V0..=VX into memory starting at I.
    StoreRegisters { x: usize },
    /// FX65: load V0..=VX from memory starting at I.
    LoadRegisters { x: usize },
}

/// Decode a big-endian instruction word.
///
/// Bit patterns outside the instruction set are a fatal decode error.
pub fn decode(word: u16) -> VmResult<Instruction> {
    use Instruction as I;

    let op = op_code(word);
    let x = op_x(word);
    let y = op_y(word);
    let n = op_n(word);
    let nn = op_nn(word);
    let nnn = op_nnn(word);

    let instruction = match op {
        0x0 => match nn {
            0xE0 => I::ClearScreen,
            0xEE => I::Return,
            _ => return Err(VmError::UnknownOpcode(word)),
        },
        0x1 => I::Jump { nnn },
        0x2 => I::Call { nnn },
        0x3 => I::SkipEqByte { x, nn },
        0x4 => I::SkipNeByte { x, nn },
        0x5 if n == 0 => I::SkipEqReg { x, y },
        0x6 => I::LoadByte { x, nn },
        0x7 => I::AddByte { x, nn },
        // Arithmetic group identified by N
        0x8 => match n {
            0x0 => I::Move { x, y },
            0x1 => I::Or { x, y },
            0x2 => I::And { x, y },
            0x3 => I::Xor { x, y },
            0x4 => I::Add { x, y },
            0x5 => I::Sub { x, y },
            0x6 => I::ShiftRight { x },
            0x7 => I::SubNeg { x, y },
            0xE => I::ShiftLeft { x },
            _ => return Err(VmError::UnknownOpcode(word)),
        },
        0x9 if n == 0 => I::SkipNeReg { x, y },
        0xA => I::LoadIndex { nnn },
        0xB => I::JumpOffset { nnn },
        0xC => I::Random { x, nn },
        0xD => I::Draw {
            x,
            y,
            n: n as usize,
        },
        // Keypad group identified by NN
        0xE => match nn {
            0x9E => I::SkipKeyPressed { x },
            0xA1 => I::SkipKeyReleased { x },
            _ => return Err(VmError::UnknownOpcode(word)),
        },
        // Miscellaneous group identified by NN
        0xF => match nn {
            0x07 => I::LoadDelay { x },
            0x0A => I::WaitKey { x },
            0x15 => I::SetDelay { x },
            0x18 => I::SetSound { x },
            0x1E => I::AddIndex { x },
            0x29 => I::LoadFont { x },
            0x33 => I::StoreBcd { x },
            0x55 => I::StoreRegisters { x },
            0x65 => I::LoadRegisters { x },
            _ => return Err(VmError::UnknownOpcode(word)),
        },
        _ => return Err(VmError::UnknownOpcode(word)),
    };

    Ok(instruction)
}

/// Extract the opcode class from the instruction word.
#[inline(always)]
fn op_code(word: u16) -> u8 {
    ((word >> 12) & 0xF) as u8
}

/// Extract operand X from the instruction word.
#[inline(always)]
fn op_x(word: u16) -> usize {
    ((word >> 8) & 0xF) as usize
}

/// Extract operand Y from the instruction word.
#[inline(always)]
fn op_y(word: u16) -> usize {
    ((word >> 4) & 0xF) as usize
}

/// Extract operand N from the instruction word.
#[inline(always)]
fn op_n(word: u16) -> u8 {
    (word & 0xF) as u8
}

/// Extract operand NN from the instruction word.
#[inline(always)]
fn op_nn(word: u16) -> u8 {
    (word & 0xFF) as u8
}

/// Extract operand NNN from the instruction word.
#[inline(always)]
fn op_nnn(word: u16) -> u16 {
    word & 0xFFF
}

#[cfg(test)]
mod test {
    use super::*;
    use Instruction as I;

    #[test]
    fn test_decode_table() {
        assert_eq!(decode(0x00E0).unwrap(), I::ClearScreen);
        assert_eq!(decode(0x00EE).unwrap(), I::Return);
        assert_eq!(decode(0x1ABC).unwrap(), I::Jump { nnn: 0xABC });
        assert_eq!(decode(0x2123).unwrap(), I::Call { nnn: 0x123 });
        assert_eq!(decode(0x3A42).unwrap(), I::SkipEqByte { x: 0xA, nn: 0x42 });
        assert_eq!(decode(0x4A42).unwrap(), I::SkipNeByte { x: 0xA, nn: 0x42 });
        assert_eq!(decode(0x5120).unwrap(), I::SkipEqReg { x: 1, y: 2 });
        assert_eq!(decode(0x6C0F).unwrap(), I::LoadByte { x: 0xC, nn: 0xF });
        assert_eq!(decode(0x7C0F).unwrap(), I::AddByte { x: 0xC, nn: 0xF });
        assert_eq!(decode(0x8120).unwrap(), I::Move { x: 1, y: 2 });
        assert_eq!(decode(0x8121).unwrap(), I::Or { x: 1, y: 2 });
        assert_eq!(decode(0x8122).unwrap(), I::And { x: 1, y: 2 });
        assert_eq!(decode(0x8123).unwrap(), I::Xor { x: 1, y: 2 });
        assert_eq!(decode(0x8124).unwrap(), I::Add { x: 1, y: 2 });
        assert_eq!(decode(0x8125).unwrap(), I::Sub { x: 1, y: 2 });
        assert_eq!(decode(0x8126).unwrap(), I::ShiftRight { x: 1 });
        assert_eq!(decode(0x8127).unwrap(), I::SubNeg { x: 1, y: 2 });
        assert_eq!(decode(0x812E).unwrap(), I::ShiftLeft { x: 1 });
        assert_eq!(decode(0x9120).unwrap(), I::SkipNeReg { x: 1, y: 2 });
        assert_eq!(decode(0xAABC).unwrap(), I::LoadIndex { nnn: 0xABC });
        assert_eq!(decode(0xBABC).unwrap(), I::JumpOffset { nnn: 0xABC });
        assert_eq!(decode(0xC3F0).unwrap(), I::Random { x: 3, nn: 0xF0 });
        assert_eq!(decode(0xD125).unwrap(), I::Draw { x: 1, y: 2, n: 5 });
        assert_eq!(decode(0xE19E).unwrap(), I::SkipKeyPressed { x: 1 });
        assert_eq!(decode(0xE1A1).unwrap(), I::SkipKeyReleased { x: 1 });
        assert_eq!(decode(0xF107).unwrap(), I::LoadDelay { x: 1 });
        assert_eq!(decode(0xF10A).unwrap(), I::WaitKey { x: 1 });
        assert_eq!(decode(0xF115).unwrap(), I::SetDelay { x: 1 });
        assert_eq!(decode(0xF118).unwrap(), I::SetSound { x: 1 });
        assert_eq!(decode(0xF11E).unwrap(), I::AddIndex { x: 1 });
        assert_eq!(decode(0xF129).unwrap(), I::LoadFont { x: 1 });
        assert_eq!(decode(0xF133).unwrap(), I::StoreBcd { x: 1 });
        assert_eq!(decode(0xF155).unwrap(), I::StoreRegisters { x: 1 });
        assert_eq!(decode(0xF165).unwrap(), I::LoadRegisters { x: 1 });
    }

    #[test]
    fn test_decode_rejects_unknown_patterns() {
        for word in [0x0000, 0x00E1, 0x5121, 0x8128, 0x812F, 0x9121, 0xE19F, 0xF000, 0xF134, 0xFFFF]
        {
            let err = decode(word).unwrap_err();
            assert!(
                matches!(err, VmError::UnknownOpcode(w) if w == word),
                "{word:#06X} must not decode"
            );
        }
    }
}
