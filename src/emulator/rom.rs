use crate::emulator::error::EmulatorError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// How many bytes each call to `read_next_chunk` asks for.
pub const CHUNK_SIZE: usize = 256;

/// A program image, read in fixed-size chunks so loading never needs a
/// buffer sized to the whole file.
pub struct Rom<R> {
    reader: R,
    eof: bool,
}

impl Rom<BufReader<File>> {
    /// Open a ROM file. Zero-length files are rejected up front.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Rom<BufReader<File>>, EmulatorError> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(EmulatorError::EmptyRom);
        }
        Ok(Rom::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> Rom<R> {
    pub fn from_reader(reader: R) -> Rom<R> {
        Rom { reader, eof: false }
    }

    /// The next chunk of up to [`CHUNK_SIZE`] bytes, empty at end of file.
    pub fn read_next_chunk(&mut self) -> Result<Vec<u8>, EmulatorError> {
        let mut chunk = vec![0; CHUNK_SIZE];
        let mut filled = 0;
        while filled < CHUNK_SIZE {
            let n = self.reader.read(&mut chunk[filled..])?;
            if n == 0 {
                self.eof = true;
                break;
            }
            filled += n;
        }
        chunk.truncate(filled);
        Ok(chunk)
    }

    pub fn at_eof(&self) -> bool {
        self.eof
    }
}
