//! Causal prediction and the sign arithmetic shared by the encoder and decoder.
//!
//! These helpers are written with shifts on purpose: the adaptive model depends on
//! two's-complement behaviour (`x >> 31` is 0 or -1) and both scan directions must
//! compute exactly the same values.

use crate::constants::MAXIMUM_SAMPLE_VALUE;

/// 0 for non-negative values, -1 for negative values.
#[inline]
pub fn bit_wise_sign(i: i32) -> i32 {
    i >> 31
}

/// 1 for non-negative values, -1 for negative values.
#[inline]
pub fn sign(n: i32) -> i32 {
    (n >> 31) | 1
}

/// Negates `i` when `sign` is -1, returns it unchanged when `sign` is 0.
#[inline]
pub fn apply_sign(i: i32, sign: i32) -> i32 {
    (sign ^ i) - sign
}

/// Combines three quantized gradients into a context id in [-364, 364].
#[inline]
pub fn compute_context_id(q1: i32, q2: i32, q3: i32) -> i32 {
    (q1 * 9 + q2) * 9 + q3
}

/// Median edge detector (ISO/IEC 14495-1, A.4.1).
#[inline]
pub fn compute_predicted_value(ra: i32, rb: i32, rc: i32) -> i32 {
    if ra < rb {
        if rc < ra {
            return rb;
        }
        if rc > rb {
            return ra;
        }
    } else {
        if rc < rb {
            return ra;
        }
        if rc > ra {
            return rb;
        }
    }
    ra + rb - rc
}

/// Clamps a bias-corrected prediction into the sample range.
#[inline]
pub fn correct_prediction(predicted: i32) -> i32 {
    if (predicted & MAXIMUM_SAMPLE_VALUE) == predicted {
        return predicted;
    }
    (!(predicted >> 31)) & MAXIMUM_SAMPLE_VALUE
}

/// Reduces a prediction error modulo the sample range into [-32768, 32767].
#[inline]
pub fn compute_error_value(e: i32) -> i32 {
    e as i16 as i32
}

#[inline]
pub fn compute_reconstructed_sample(predicted: i32, error_value: i32) -> u16 {
    (predicted.wrapping_add(error_value) & MAXIMUM_SAMPLE_VALUE) as u16
}
