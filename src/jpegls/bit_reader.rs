use crate::error::JpeglsError;
use crate::jpeg_marker_code::JPEG_MARKER_START_BYTE;

/// Reads the bit stream produced by [`BitWriter`](super::bit_writer::BitWriter), dropping
/// the zero bit stuffed after each 0xFF byte.
pub struct BitReader<'a> {
    source: &'a [u8],
    position: usize,
    read_cache: u32,
    valid_bits: i32,
    is_ff_read: bool,
}

impl<'a> BitReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
            read_cache: 0,
            valid_bits: 0,
            is_ff_read: false,
        }
    }

    /// Number of source bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    fn next_byte(&mut self) -> Result<u8, JpeglsError> {
        let byte = *self
            .source
            .get(self.position)
            .ok_or(JpeglsError::UnexpectedEndOfStream)?;
        self.position += 1;
        Ok(byte)
    }

    fn fill_read_cache(&mut self) -> Result<(), JpeglsError> {
        let byte = self.next_byte()? as u32;
        if self.is_ff_read {
            self.is_ff_read = false;
            self.read_cache = (self.read_cache << 7) | byte;
            self.valid_bits += 7;
        } else {
            self.is_ff_read = byte == JPEG_MARKER_START_BYTE as u32;
            self.read_cache = (self.read_cache << 8) | byte;
            self.valid_bits += 8;
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool, JpeglsError> {
        if self.valid_bits == 0 {
            self.fill_read_cache()?;
        }
        self.valid_bits -= 1;
        Ok((self.read_cache >> self.valid_bits) & 1 != 0)
    }

    /// Reads `bit_count` bits (at most 24) as an unsigned value, most significant first.
    pub fn read_binary_value(&mut self, bit_count: i32) -> Result<i32, JpeglsError> {
        debug_assert!((0..=24).contains(&bit_count));
        if bit_count == 0 {
            return Ok(0);
        }
        while self.valid_bits < bit_count {
            self.fill_read_cache()?;
        }
        self.valid_bits -= bit_count;
        let mask = (1u32 << bit_count) - 1;
        Ok(((self.read_cache >> self.valid_bits) & mask) as i32)
    }

    /// Counts the zero bits in front of the next one bit and consumes both.
    pub fn read_unary_value(&mut self) -> Result<i32, JpeglsError> {
        let mut value = 0;
        while !self.read_bit()? {
            value += 1;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpegls::bit_writer::BitWriter;

    #[test]
    fn reads_back_mixed_codes() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        writer.write_binary_value(0xABC, 12);
        writer.write_unary_value(5);
        writer.write_bit(true);
        writer.write_binary_value(0xFFFF, 16);
        writer.write_unary_value(0);
        writer.write_binary_value(3, 2);
        writer.end_scan();

        let mut reader = BitReader::new(&out);
        assert_eq!(reader.read_binary_value(12).unwrap(), 0xABC);
        assert_eq!(reader.read_unary_value().unwrap(), 5);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_binary_value(16).unwrap(), 0xFFFF);
        assert_eq!(reader.read_unary_value().unwrap(), 0);
        assert_eq!(reader.read_binary_value(2).unwrap(), 3);
    }

    #[test]
    fn skips_stuffed_bit_after_ff() {
        // FF followed by a stuffed byte carrying 7 data bits (1010101).
        let data = [0xFF, 0b0101_0101];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_binary_value(8).unwrap(), 0xFF);
        assert_eq!(reader.read_binary_value(7).unwrap(), 0b101_0101);
    }

    #[test]
    fn stuffed_bit_skipped_when_reading_bit_by_bit() {
        let data = [0xFF, 0b0100_0000];
        let mut reader = BitReader::new(&data);
        for _ in 0..8 {
            assert!(reader.read_bit().unwrap());
        }
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
    }

    #[test]
    fn zero_width_read_consumes_nothing() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_binary_value(0).unwrap(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mut reader = BitReader::new(&[0x00]);
        assert_eq!(
            reader.read_unary_value(),
            Err(JpeglsError::UnexpectedEndOfStream)
        );
        let mut reader = BitReader::new(&[0xAB]);
        assert_eq!(
            reader.read_binary_value(9),
            Err(JpeglsError::UnexpectedEndOfStream)
        );
    }
}
