/// A structure for splitting a 16-bit opcode into the operand
/// fields used by the CHIP-8 instruction encoding: four nibbles,
/// the low byte (`NN`), or the low twelve bits (`NNN`).
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        let nibble_mask = 0x0F;
        (
            (self.0 >> 4) & nibble_mask,
            self.0 & nibble_mask,
            (self.1 >> 4) & nibble_mask,
            self.1 & nibble_mask,
        )
    }

    /// The `NN` field of an opcode.
    pub fn last_8_bits(&self) -> u8 {
        self.1
    }

    /// The `NNN` field of an opcode.
    pub fn last_12_bits(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u16() {
        assert_eq!(0xABCD, BitSplitter::from_u16(0xABCD).as_u16());
        assert_eq!(0x1234, BitSplitter::new(0x12, 0x34).as_u16());
        assert_eq!(0x0000, BitSplitter::from_u16(0x0000).as_u16());
    }

    #[test]
    fn splits_into_nibbles() {
        assert_eq!((0xA, 0xB, 0xC, 0xD), BitSplitter::from_u16(0xABCD).as_four_u8());
        assert_eq!((0xF, 0xF, 0xF, 0xF), BitSplitter::from_u16(0xFFFF).as_four_u8());
        assert_eq!((0x0, 0x1, 0x2, 0x3), BitSplitter::from_u16(0x0123).as_four_u8());
    }

    #[test]
    fn extracts_operand_fields() {
        assert_eq!(0xCD, BitSplitter::from_u16(0xABCD).last_8_bits());
        assert_eq!(0xBCD, BitSplitter::from_u16(0xABCD).last_12_bits());
    }
}
