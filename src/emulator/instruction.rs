use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for register indices.
#[derive(Debug, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single decoded instruction.
///
/// Two bytes written in hexadecimal, with the following operand fields:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifiers
///
/// Opcodes that fit no pattern decode to `Unknown`; the CPU reports and
/// skips those rather than corrupting state.
#[derive(Debug, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,               // 00E0
    Return,                    // 00EE
    LowRes,                    // 00FE (SUPERCHIP)
    HighRes,                   // 00FF (SUPERCHIP)
    Goto(Addr),                // 1NNN
    Call(Addr),                // 2NNN
    IfRegEqConst(Reg, Const),  // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg),      // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg),     // 8XY0
    BitwiseOr(Reg, Reg),       // 8XY1
    BitwiseAnd(Reg, Reg),      // 8XY2
    BitwiseXor(Reg, Reg),      // 8XY3
    IncRegByReg(Reg, Reg),     // 8XY4
    DecRegByReg(Reg, Reg),     // 8XY5
    BitshiftRight(Reg, Reg),   // 8XY6 (Y only matters on targets that copy it)
    SetVxVyMinusVx(Reg, Reg),  // 8XY7
    BitshiftLeft(Reg, Reg),    // 8XYE
    IfRegNeqReg(Reg, Reg),     // 9XY0
    SetI(Addr),                // ANNN
    JumpOffset(Reg, Addr),     // BNNN (register-indexed on the HP48 family)
    SetVxRand(Reg, Const),     // CXNN
    Draw(Reg, Reg, Const),     // DXYN
    IfKeyEqVx(Reg),            // EX9E
    IfKeyNeqVx(Reg),           // EXA1
    SetRegToDelayTimer(Reg),   // FX07
    SetRegToGetKey(Reg),       // FX0A
    SetDelayTimerToReg(Reg),   // FX15
    SetSoundTimerToReg(Reg),   // FX18
    AddRegToI(Reg),            // FX1E
    SetIToSpriteAddrVx(Reg),   // FX29
    SetIToBcdOfReg(Reg),       // FX33
    RegDump(Reg),              // FX55
    RegLoad(Reg),              // FX65
    Unknown(u16),
}

impl Instruction {
    pub fn from_u16(value: u16) -> Instruction {
        Instruction::from_two_u8((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        let opcode = BitSplitter::new(left, right);
        match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (0, 0, 0xF, 0xE) => Instruction::LowRes,
            (0, 0, 0xF, 0xF) => Instruction::HighRes,
            (1, _, _, _) => Instruction::Goto(Addr(opcode.last_12_bits())),
            (2, _, _, _) => Instruction::Call(Addr(opcode.last_12_bits())),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), Const(opcode.last_8_bits())),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), Const(opcode.last_8_bits())),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), Const(opcode.last_8_bits())),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), Const(opcode.last_8_bits())),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, y, 6) => Instruction::BitshiftRight(Reg(x), Reg(y)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, y, 0xE) => Instruction::BitshiftLeft(Reg(x), Reg(y)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(Addr(opcode.last_12_bits())),
            (0xB, x, _, _) => Instruction::JumpOffset(Reg(x), Addr(opcode.last_12_bits())),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), Const(opcode.last_8_bits())),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => Instruction::Unknown(opcode.as_u16()),
        }
    }
}
