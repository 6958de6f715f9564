//! MSB-first bit packer for JPEG-LS scan data.
//!
//! Whenever a 0xFF byte leaves the bit buffer, the next byte only carries 7 data bits
//! and a leading zero bit. That keeps every `FF xx` pair in the scan below `FF 80`, so a
//! marker can never appear inside the entropy-coded segment.

use crate::jpeg_marker_code::JPEG_MARKER_START_BYTE;

pub struct BitWriter<'a> {
    destination: &'a mut Vec<u8>,
    bit_buffer: u32,
    free_bit_count: i32,
    is_ff_written: bool,
    bytes_written: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(destination: &'a mut Vec<u8>) -> Self {
        Self {
            destination,
            bit_buffer: 0,
            free_bit_count: 32,
            is_ff_written: false,
            bytes_written: 0,
        }
    }

    /// Bytes emitted to the destination so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.write_binary_value(bit as u32, 1);
    }

    /// Appends the `bit_count` low bits of `value`, most significant first.
    ///
    /// `bit_count` may exceed 32 (long unary prefixes); the bits above the width of
    /// `value` are zeros.
    pub fn write_binary_value(&mut self, value: u32, bit_count: i32) {
        let value = low_bits(value, bit_count);
        let mut bit_count = bit_count;

        while bit_count > self.free_bit_count {
            let shift = bit_count - self.free_bit_count;
            if shift < 32 {
                self.bit_buffer |= value >> shift;
            }
            self.flush();
            bit_count = shift;
        }

        if bit_count > 0 {
            self.free_bit_count -= bit_count;
            self.bit_buffer |= low_bits(value, bit_count) << self.free_bit_count;
        }
    }

    /// Writes `value` zero bits terminated by a one bit.
    pub fn write_unary_value(&mut self, value: i32) {
        self.write_binary_value(1, value + 1);
    }

    /// Emits the full 32-bit buffer. A stuffed byte consumes one bit less, so those bits
    /// stay at the top of the buffer.
    fn flush(&mut self) {
        self.free_bit_count = 32;
        for _ in 0..4 {
            let byte_val = if self.is_ff_written {
                let byte_val = (self.bit_buffer >> 25) as u8;
                self.bit_buffer <<= 7;
                self.is_ff_written = false;
                self.free_bit_count -= 1;
                byte_val
            } else {
                let byte_val = (self.bit_buffer >> 24) as u8;
                self.bit_buffer <<= 8;
                self.is_ff_written = byte_val == JPEG_MARKER_START_BYTE;
                byte_val
            };
            self.destination.push(byte_val);
            self.bytes_written += 1;
        }
    }

    /// Pads the pending bits with zeros and writes them out. A trailing 0xFF is always
    /// followed by its stuffed byte.
    pub fn end_scan(&mut self) {
        while self.free_bit_count < 32 || self.is_ff_written {
            let byte_val = if self.is_ff_written {
                let byte_val = (self.bit_buffer >> 25) as u8;
                self.bit_buffer <<= 7;
                self.is_ff_written = false;
                self.free_bit_count += 7;
                byte_val
            } else {
                let byte_val = (self.bit_buffer >> 24) as u8;
                self.bit_buffer <<= 8;
                self.is_ff_written = byte_val == JPEG_MARKER_START_BYTE;
                self.free_bit_count += 8;
                byte_val
            };
            self.destination.push(byte_val);
            self.bytes_written += 1;
        }
        self.bit_buffer = 0;
        self.free_bit_count = 32;
    }
}

fn low_bits(value: u32, bit_count: i32) -> u32 {
    if bit_count >= 32 {
        value
    } else if bit_count <= 0 {
        0
    } else {
        value & ((1u32 << bit_count) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut BitWriter)) -> Vec<u8> {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        f(&mut writer);
        writer.end_scan();
        out
    }

    #[test]
    fn packs_msb_first_and_pads_with_zeros() {
        let out = written(|w| {
            w.write_binary_value(0b101, 3);
            w.write_bit(true);
        });
        assert_eq!(out, vec![0b1011_0000]);
    }

    #[test]
    fn unary_is_zeros_then_one() {
        let out = written(|w| w.write_unary_value(3));
        assert_eq!(out, vec![0b0001_0000]);
    }

    #[test]
    fn long_unary_prefix_spans_buffer_flushes() {
        let out = written(|w| w.write_unary_value(47));
        // 47 zeros then a one: bytes 0..5 are zero, the one lands in bit 0 of byte 5.
        assert_eq!(out, vec![0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn inserts_zero_bit_after_ff() {
        let out = written(|w| w.write_binary_value(0xFFFF, 16));
        // FF, then 0 + seven ones, then the remaining one bit padded.
        assert_eq!(out, vec![0xFF, 0x7F, 0x80]);
    }

    #[test]
    fn trailing_ff_gets_its_stuffed_byte() {
        let out = written(|w| w.write_binary_value(0xFF, 8));
        assert_eq!(out, vec![0xFF, 0x00]);
    }

    #[test]
    fn never_emits_marker_like_pairs() {
        let out = written(|w| {
            for _ in 0..100 {
                w.write_binary_value(0x1FFF, 13);
                w.write_binary_value(0x1F, 5);
            }
        });
        for pair in out.windows(2) {
            if pair[0] == 0xFF {
                assert!(pair[1] < 0x80, "found FF {:02X}", pair[1]);
            }
        }
    }

    #[test]
    fn counts_written_bytes() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        assert_eq!(writer.bytes_written(), 0);
        writer.write_binary_value(0x12345678, 32);
        writer.write_binary_value(0x9A, 8);
        assert_eq!(writer.bytes_written(), 4);
        writer.end_scan();
        assert_eq!(writer.bytes_written(), 5);
        assert_eq!(out, vec![0x12, 0x34, 0x56, 0x78, 0x9A]);
    }
}
