use crate::constants::{DEFAULT_RESET_THRESHOLD, RANGE};
use crate::jpegls::coding_parameters::initialization_value_for_a;
use crate::jpegls::prediction::bit_wise_sign;

// Code segment A.13 bounds for the bias correction value C.
const MAX_C: i32 = 127;
const MIN_C: i32 = -128;

/// Saturating successor/predecessor table for C: `TABLE_C[C + 1 + 128]` is `C` clamped
/// to [-128, 127], for C in [-129, 128].
const TABLE_C: [i8; 258] = {
    let mut table = [0i8; 258];
    table[0] = MIN_C as i8;
    let mut i = 0;
    while i < 256 {
        table[i + 1] = (i as i32 + MIN_C) as i8;
        i += 1;
    }
    table[257] = MAX_C as i8;
    table
};

#[inline]
fn saturate_c(c: i32) -> i32 {
    TABLE_C[(c + 1 - MIN_C) as usize] as i32
}

/// Adaptive statistics of one of the 365 regular mode contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegularModeContext {
    /// Accumulated magnitudes of the prediction errors.
    a: i32,
    /// Accumulated prediction errors, kept in (-N, 0].
    b: i32,
    /// Bias correction applied to the prediction.
    c: i32,
    /// Number of occurrences since the last reset.
    n: i32,
    reset_threshold: i32,
}

impl Default for RegularModeContext {
    fn default() -> Self {
        Self::new(RANGE, DEFAULT_RESET_THRESHOLD)
    }
}

impl RegularModeContext {
    pub fn new(range: i32, reset_threshold: i32) -> Self {
        Self {
            a: initialization_value_for_a(range),
            b: 0,
            c: 0,
            n: 1,
            reset_threshold,
        }
    }

    #[cfg(test)]
    pub fn a(&self) -> i32 {
        self.a
    }

    #[cfg(test)]
    pub fn b(&self) -> i32 {
        self.b
    }

    pub fn c(&self) -> i32 {
        self.c
    }

    #[cfg(test)]
    pub fn n(&self) -> i32 {
        self.n
    }

    /// All ones (-1) when the coded residual has to be inverted (k == 0 and B/N < -1/2).
    pub fn get_error_correction(&self, k: i32) -> i32 {
        if k != 0 {
            return 0;
        }
        bit_wise_sign(2 * self.b + self.n - 1)
    }

    // Code segments A.12 and A.13
    pub fn update_variables_and_bias(&mut self, error_value: i32) {
        debug_assert!(self.n != 0);

        let mut a = self.a + error_value.abs();
        let mut b = self.b + error_value;
        let mut n = self.n;

        if n == self.reset_threshold {
            a >>= 1;
            b >>= 1;
            n >>= 1;
        }

        n += 1;

        if b + n <= 0 {
            b += n;
            if b <= -n {
                b = -n + 1;
            }
            self.c = saturate_c(self.c - 1);
        } else if b > 0 {
            b -= n;
            if b > 0 {
                b = 0;
            }
            self.c = saturate_c(self.c + 1);
        }

        self.a = a;
        self.b = b;
        self.n = n;
    }

    /// Smallest k with `N << k >= A`.
    pub fn compute_golomb_coding_parameter(&self) -> i32 {
        let mut k = 0;
        while (self.n << k) < self.a {
            k += 1;
            debug_assert!(k <= 32);
        }
        k
    }
}
