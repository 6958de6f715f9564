use crate::constants::{J, MAXIMUM_RUN_INDEX, REGULAR_CONTEXT_COUNT};
use crate::jpegls::coding_parameters::{CodingParameters, JpeglsPcParameters};
use crate::jpegls::gradient_quantizer::{QUANTIZATION_LUT, QuantizationLut};
use crate::jpegls::prediction::compute_context_id;
use crate::jpegls::regular_mode_context::RegularModeContext;
use crate::jpegls::run_mode_context::RunModeContext;

/// Adaptive state of one scan, shared by [`ScanEncoder`](super::scan_encoder::ScanEncoder)
/// and [`ScanDecoder`](super::scan_decoder::ScanDecoder).
///
/// Both drivers must evolve this state identically, so every model decision
/// (context selection, Golomb limits, run index bookkeeping) lives here.
pub struct ScanState {
    coding_parameters: CodingParameters,
    regular_mode_contexts: Vec<RegularModeContext>,
    run_mode_contexts: [RunModeContext; 2],
    run_index: usize,
    quantization_lut: &'static QuantizationLut,
}

impl ScanState {
    pub fn new(coding_parameters: CodingParameters, pc_parameters: JpeglsPcParameters) -> Self {
        let range = pc_parameters.maximum_sample_value + 1;
        let reset = pc_parameters.reset_value;
        Self {
            coding_parameters,
            regular_mode_contexts: vec![
                RegularModeContext::new(range, reset);
                REGULAR_CONTEXT_COUNT
            ],
            run_mode_contexts: [
                RunModeContext::new(0, range, reset),
                RunModeContext::new(1, range, reset),
            ],
            run_index: 0,
            quantization_lut: &QUANTIZATION_LUT,
        }
    }

    pub fn coding_parameters(&self) -> &CodingParameters {
        &self.coding_parameters
    }

    /// Signed context id Q of the local gradients around the current sample.
    #[inline]
    pub fn context_id(&self, ra: i32, rb: i32, rc: i32, rd: i32) -> i32 {
        let lut = self.quantization_lut;
        compute_context_id(lut.quantize(rd - rb), lut.quantize(rb - rc), lut.quantize(rc - ra))
    }

    #[inline]
    pub fn regular_mode_context(&mut self, index: usize) -> &mut RegularModeContext {
        &mut self.regular_mode_contexts[index]
    }

    #[inline]
    pub fn run_mode_context(&mut self, run_interruption_type: usize) -> &mut RunModeContext {
        &mut self.run_mode_contexts[run_interruption_type]
    }

    pub fn run_index(&self) -> usize {
        self.run_index
    }

    /// J[RunIndex]: the bit count of a run remainder.
    #[inline]
    pub fn run_order(&self) -> i32 {
        J[self.run_index]
    }

    /// Number of samples covered by one '1' bit of a run code.
    #[inline]
    pub fn run_chunk_length(&self) -> usize {
        1 << J[self.run_index]
    }

    #[inline]
    pub fn increment_run_index(&mut self) {
        if self.run_index < MAXIMUM_RUN_INDEX {
            self.run_index += 1;
        }
    }

    #[inline]
    pub fn decrement_run_index(&mut self) {
        if self.run_index > 0 {
            self.run_index -= 1;
        }
    }

    /// Golomb code length limit for the sample that ends a run.
    #[inline]
    pub fn run_interruption_limit(&self) -> i32 {
        self.coding_parameters.limit - J[self.run_index] - 1
    }
}

/// Two rows of `width + 2` samples: the previous (reconstructed) row and the current row.
///
/// Sample `i` of a row lives at index `i + 1`; index 0 and `width + 1` are borders.
pub struct LineBuffer {
    rows: Vec<u16>,
    width: usize,
    current_is_second: bool,
}

impl LineBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            rows: vec![0; 2 * (width + 2)],
            width,
            current_is_second: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Makes the last current row the previous row and prepares its borders:
    /// the right border repeats the last sample above, the left border of the new
    /// row repeats the first sample above. The previous row's left border keeps
    /// what was stored while it was being coded.
    pub fn start_line(&mut self) {
        self.current_is_second = !self.current_is_second;
        let width = self.width;
        let (previous, current) = self.rows_mut();
        previous[width + 1] = previous[width];
        current[0] = previous[1];
    }

    /// `(previous, current)` rows, borders included.
    pub fn rows_mut(&mut self) -> (&mut [u16], &mut [u16]) {
        let stride = self.width + 2;
        let (first, second) = self.rows.split_at_mut(stride);
        if self.current_is_second {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Samples of the current row without borders.
    pub fn current_samples(&self) -> &[u16] {
        let stride = self.width + 2;
        let offset = if self.current_is_second { stride } else { 0 };
        &self.rows[offset + 1..offset + 1 + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScanState {
        ScanState::new(CodingParameters::lossless_16bit(), JpeglsPcParameters::default())
    }

    #[test]
    fn flat_neighbourhood_has_context_zero() {
        let state = state();
        assert_eq!(state.context_id(500, 500, 500, 500), 0);
        assert_ne!(state.context_id(500, 500, 500, 501), 0);
    }

    #[test]
    fn negated_neighbourhood_mirrors_the_context() {
        let state = state();
        let neighbourhoods = [
            (100, 200, 150, 4000),
            (65535, 0, 300, 12),
            (7, 7, 90, 7),
            (30000, 29990, 30100, 30500),
        ];
        for (ra, rb, rc, rd) in neighbourhoods {
            let q = state.context_id(ra, rb, rc, rd);
            let mirrored = state.context_id(65535 - ra, 65535 - rb, 65535 - rc, 65535 - rd);
            assert_eq!(mirrored, -q);
            assert!(q.abs() < REGULAR_CONTEXT_COUNT as i32);
        }
    }

    #[test]
    fn run_index_is_clamped() {
        let mut state = state();
        state.decrement_run_index();
        assert_eq!(state.run_index(), 0);
        assert_eq!(state.run_chunk_length(), 1);
        assert_eq!(state.run_interruption_limit(), 63);
        for _ in 0..40 {
            state.increment_run_index();
        }
        assert_eq!(state.run_index(), 31);
        assert_eq!(state.run_order(), 15);
        assert_eq!(state.run_chunk_length(), 1 << 15);
        assert_eq!(state.run_interruption_limit(), 64 - 15 - 1);
    }

    #[test]
    fn line_buffer_borders() {
        let mut lines = LineBuffer::new(3);
        lines.start_line();
        {
            let (previous, current) = lines.rows_mut();
            assert!(previous.iter().all(|&s| s == 0));
            assert_eq!(current[0], 0);
            current[1..4].copy_from_slice(&[10, 20, 30]);
        }
        assert_eq!(lines.current_samples(), &[10, 20, 30]);

        lines.start_line();
        let (previous, current) = lines.rows_mut();
        assert_eq!(&previous[1..4], &[10, 20, 30]);
        assert_eq!(previous[4], 30);
        assert_eq!(previous[0], 0);
        assert_eq!(current[0], 10);
    }

    #[test]
    fn left_border_above_is_the_border_of_the_previous_row() {
        let mut lines = LineBuffer::new(2);
        lines.start_line();
        lines.rows_mut().1[1..3].copy_from_slice(&[5, 6]);
        lines.start_line();
        lines.rows_mut().1[1..3].copy_from_slice(&[7, 8]);
        lines.start_line();
        let (previous, current) = lines.rows_mut();
        // The row holding 7, 8 got 5 as its left border when it was current.
        assert_eq!(previous[0], 5);
        assert_eq!(current[0], 7);
    }
}
