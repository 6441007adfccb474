//! Little-endian cursor used by the header and record decoders.

use crate::error::{WthorError, WthorResult};

/// A cursor over a borrowed byte slice.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, n: usize) -> WthorResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(WthorError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn skip(&mut self, n: usize) -> WthorResult<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> WthorResult<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16(&mut self) -> WthorResult<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> WthorResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian_fields() {
        let buf = [0x07, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut reader = ByteReader::new(&buf);
        assert_eq!(reader.read_u8().unwrap(), 0x07);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_is_an_error() {
        let buf = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&buf);
        reader.skip(2).unwrap();
        match reader.read_u16() {
            Err(WthorError::UnexpectedEof { needed, remaining }) => {
                assert_eq!(needed, 2);
                assert_eq!(remaining, 1);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
        // A failed read does not advance the cursor
        assert_eq!(reader.read_u8().unwrap(), 0x03);
    }
}
