use crate::constants::{DEFAULT_RESET_THRESHOLD, RANGE};
use crate::jpegls::coding_parameters::initialization_value_for_a;

/// Statistics for the sample that interrupts a run (ISO/IEC 14495-1, A.7.2).
///
/// Context 1 is used when the neighbours above and to the left are equal
/// (`run_interruption_type == 1`), context 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunModeContext {
    run_interruption_type: i32,
    a: i32,
    n: i32,
    nn: i32,
    reset_threshold: i32,
}

impl RunModeContext {
    pub fn new(run_interruption_type: i32, range: i32, reset_threshold: i32) -> Self {
        Self {
            run_interruption_type,
            a: initialization_value_for_a(range),
            n: 1,
            nn: 0,
            reset_threshold,
        }
    }

    /// The context used for interruption type `run_interruption_type` with the default
    /// 16-bit parameters.
    #[cfg(test)]
    pub fn with_defaults(run_interruption_type: i32) -> Self {
        Self::new(run_interruption_type, RANGE, DEFAULT_RESET_THRESHOLD)
    }

    #[cfg(test)]
    pub fn n(&self) -> i32 {
        self.n
    }

    #[cfg(test)]
    pub fn nn(&self) -> i32 {
        self.nn
    }

    pub fn compute_golomb_coding_parameter(&self) -> i32 {
        let temp = self.a + (self.n >> 1) * self.run_interruption_type;
        let mut n_test = self.n;
        let mut k = 0;

        while n_test < temp {
            n_test <<= 1;
            k += 1;
            debug_assert!(k <= 32);
        }
        k
    }

    // Code segment A.23
    pub fn update_variables(&mut self, error_value: i32, e_mapped_error_value: i32) {
        if error_value < 0 {
            self.nn += 1;
        }

        self.a += (e_mapped_error_value + 1 - self.run_interruption_type) >> 1;

        if self.n == self.reset_threshold {
            self.a >>= 1;
            self.n >>= 1;
            self.nn >>= 1;
        }

        self.n += 1;
    }

    /// Mapped value EMErrval of an interruption error (code segment A.21 and A.22).
    pub fn compute_mapped_error_value(&self, error_value: i32, k: i32) -> i32 {
        let map = self.compute_map(error_value, k) as i32;
        2 * error_value.abs() - self.run_interruption_type - map
    }

    /// Inverse of [`compute_mapped_error_value`](Self::compute_mapped_error_value).
    pub fn decode_error_value(&self, e_mapped_error_value: i32, k: i32) -> i32 {
        let temp = e_mapped_error_value + self.run_interruption_type;
        let map = (temp & 1) != 0;
        let error_value_abs = (temp + (map as i32)) / 2;

        if (k != 0 || (2 * self.nn >= self.n)) == map {
            debug_assert!(map == self.compute_map(-error_value_abs, k));
            -error_value_abs
        } else {
            debug_assert!(map == self.compute_map(error_value_abs, k));
            error_value_abs
        }
    }

    // Code segment A.21
    pub fn compute_map(&self, error_value: i32, k: i32) -> bool {
        if k == 0 && error_value > 0 && 2 * self.nn < self.n {
            return true;
        }

        if error_value < 0 && 2 * self.nn >= self.n {
            return true;
        }

        if error_value < 0 && k != 0 {
            return true;
        }

        false
    }
}
