use crate::emulator::error::EmulatorError;

const MEM_SIZE: usize = 4096;

/// The flat 4KB address space shared by the interpreter and the program.
///
/// Addresses `0x000..0x200` hold interpreter data (the hex font); nothing
/// enforces that split here, since the original hardware had no memory
/// protection either. Out-of-range accesses are interpreter defects and
/// fail fast rather than wrapping.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            bytes: [0; MEM_SIZE],
        }
    }

    pub fn read(&self, addr: usize) -> Result<u8, EmulatorError> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(EmulatorError::OutOfBounds { addr })
    }

    pub fn write(&mut self, addr: usize, val: u8) -> Result<(), EmulatorError> {
        match self.bytes.get_mut(addr) {
            Some(byte) => {
                *byte = val;
                Ok(())
            }
            None => Err(EmulatorError::OutOfBounds { addr }),
        }
    }

    pub fn clear(&mut self) {
        self.bytes = [0; MEM_SIZE];
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_bytes_can_be_read_back() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAB).unwrap();
        assert_eq!(memory.read(0x200).unwrap(), 0xAB);
        assert_eq!(memory.read(0x201).unwrap(), 0x00);
    }

    #[test]
    fn edges_of_the_address_space_are_valid() {
        let mut memory = Memory::new();
        memory.write(0, 1).unwrap();
        memory.write(MEM_SIZE - 1, 2).unwrap();
        assert_eq!(memory.read(0).unwrap(), 1);
        assert_eq!(memory.read(MEM_SIZE - 1).unwrap(), 2);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.read(MEM_SIZE),
            Err(EmulatorError::OutOfBounds { addr: 4096 })
        ));
        assert!(memory.write(MEM_SIZE, 0).is_err());
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut memory = Memory::new();
        memory.write(0x300, 0xFF).unwrap();
        memory.clear();
        assert_eq!(memory.read(0x300).unwrap(), 0);
    }
}
