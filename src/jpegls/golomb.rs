//! Length-limited Golomb-Rice coding of mapped prediction errors (ISO/IEC 14495-1, A.5.3).

use crate::constants::RANGE;
use crate::error::JpeglsError;
use crate::jpegls::bit_reader::BitReader;
use crate::jpegls::bit_writer::BitWriter;

/// Folds a signed error onto the non-negative integers: 0, -1, 1, -2, 2, ...
#[inline]
pub fn map_error_value(error_value: i32) -> i32 {
    (error_value >> 31) ^ (2 * error_value)
}

#[inline]
pub fn unmap_error_value(mapped_error: i32) -> i32 {
    let sign = (mapped_error << 31) >> 31;
    sign ^ (mapped_error >> 1)
}

/// Writes `mapped_error` with Golomb parameter `k`.
///
/// Values whose unary prefix would reach `limit - qbpp - 1` are escaped: that many zeros,
/// a one, then `mapped_error - 1` in `qbpp` bits.
pub fn encode_mapped_value(
    writer: &mut BitWriter,
    k: i32,
    mapped_error: i32,
    limit: i32,
    quantized_bits_per_sample: i32,
) {
    let escape_threshold = limit - quantized_bits_per_sample - 1;
    let high_bits = mapped_error >> k;

    if high_bits < escape_threshold {
        writer.write_unary_value(high_bits);
        writer.write_binary_value(mapped_error as u32, k);
        return;
    }

    writer.write_unary_value(escape_threshold);
    writer.write_binary_value((mapped_error - 1) as u32, quantized_bits_per_sample);
}

/// Reads a value written by [`encode_mapped_value`].
///
/// A decoded value above the sample range cannot come from a valid scan and is reported
/// as [`JpeglsError::InvalidData`].
pub fn decode_value(
    reader: &mut BitReader,
    k: i32,
    limit: i32,
    quantized_bits_per_sample: i32,
) -> Result<i32, JpeglsError> {
    let escape_threshold = limit - quantized_bits_per_sample - 1;
    let high_bits = reader.read_unary_value()?;

    let value = if high_bits >= escape_threshold {
        reader.read_binary_value(quantized_bits_per_sample)? + 1
    } else {
        if k > 24 {
            return Err(JpeglsError::InvalidData);
        }
        (high_bits << k) + reader.read_binary_value(k)?
    };

    if value > RANGE {
        return Err(JpeglsError::InvalidData);
    }
    Ok(value)
}
