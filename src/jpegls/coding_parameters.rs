use crate::constants::{
    BITS_PER_SAMPLE, DEFAULT_RESET_THRESHOLD, MAXIMUM_SAMPLE_VALUE, NEAR_LOSSLESS,
};
use std::cmp::max;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingParameters {
    pub limit: i32,
    pub quantized_bits_per_sample: i32,
}

impl CodingParameters {
    /// Parameters of every scan this codec writes: 16-bit samples, NEAR = 0.
    pub fn lossless_16bit() -> Self {
        Self {
            limit: compute_limit_parameter(BITS_PER_SAMPLE),
            quantized_bits_per_sample: BITS_PER_SAMPLE,
        }
    }
}

impl Default for CodingParameters {
    fn default() -> Self {
        Self::lossless_16bit()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpeglsPcParameters {
    pub maximum_sample_value: i32,
    pub threshold1: i32,
    pub threshold2: i32,
    pub threshold3: i32,
    pub reset_value: i32,
}

impl Default for JpeglsPcParameters {
    fn default() -> Self {
        compute_default(MAXIMUM_SAMPLE_VALUE, NEAR_LOSSLESS)
    }
}

// Clamping function as defined by ISO/IEC 14495-1, Figure C.3
const fn clamp(i: i32, j: i32, maximum_sample_value: i32) -> i32 {
    if i > maximum_sample_value || i < j {
        j
    } else {
        i
    }
}

/// Default coding threshold values as defined by ISO/IEC 14495-1, C.2.4.1.1.1, for
/// `maximum_sample_value >= 128`. The factor saturates at 4095, so every depth above
/// 12 bits shares the same thresholds (18, 67, 276 in the lossless case).
pub const fn compute_default(maximum_sample_value: i32, near_lossless: i32) -> JpeglsPcParameters {
    // Default threshold values for JPEG-LS statistical modeling, ISO/IEC 14495-1 table C.3
    // for the case MAXVAL = 255 and NEAR = 0.
    const BASIC_THRESHOLD1: i32 = 3;
    const BASIC_THRESHOLD2: i32 = 7;
    const BASIC_THRESHOLD3: i32 = 21;

    let capped = if maximum_sample_value < 4095 { maximum_sample_value } else { 4095 };
    let factor = (capped + 128) / 256;
    let threshold1 = clamp(
        factor * (BASIC_THRESHOLD1 - 2) + 2 + 3 * near_lossless,
        near_lossless + 1,
        maximum_sample_value,
    );
    let threshold2 = clamp(
        factor * (BASIC_THRESHOLD2 - 3) + 3 + 5 * near_lossless,
        threshold1,
        maximum_sample_value,
    );

    JpeglsPcParameters {
        maximum_sample_value,
        threshold1,
        threshold2,
        threshold3: clamp(
            factor * (BASIC_THRESHOLD3 - 4) + 4 + 7 * near_lossless,
            threshold2,
            maximum_sample_value,
        ),
        reset_value: DEFAULT_RESET_THRESHOLD,
    }
}

/// LIMIT as defined by ISO/IEC 14495-1, A.2.1 (64 for 16-bit samples).
pub fn compute_limit_parameter(bits_per_sample: i32) -> i32 {
    2 * (bits_per_sample + max(8, bits_per_sample))
}

/// Initial value of the A accumulators, ISO/IEC 14495-1, A.2.1.
pub fn initialization_value_for_a(range: i32) -> i32 {
    max(2, (range + 32) / 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_for_16_bit() {
        let pc = JpeglsPcParameters::default();
        assert_eq!(pc.maximum_sample_value, 65535);
        assert_eq!(pc.threshold1, 18);
        assert_eq!(pc.threshold2, 67);
        assert_eq!(pc.threshold3, 276);
        assert_eq!(pc.reset_value, 64);
    }

    #[test]
    fn limit_for_16_bit_is_64() {
        let parameters = CodingParameters::lossless_16bit();
        assert_eq!(parameters.limit, 64);
        assert_eq!(parameters.quantized_bits_per_sample, 16);
    }

    #[test]
    fn initial_a_for_full_range() {
        assert_eq!(initialization_value_for_a(65536), 1024);
        assert_eq!(initialization_value_for_a(4), 2);
    }
}
