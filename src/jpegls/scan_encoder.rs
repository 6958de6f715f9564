use log::{debug, trace};

use crate::jpegls::bit_writer::BitWriter;
use crate::jpegls::coding_parameters::{CodingParameters, JpeglsPcParameters};
use crate::jpegls::golomb::{encode_mapped_value, map_error_value};
use crate::jpegls::prediction::{
    apply_sign, bit_wise_sign, compute_error_value, compute_predicted_value,
    compute_reconstructed_sample, correct_prediction, sign,
};
use crate::jpegls::scan_state::{LineBuffer, ScanState};

/// Encodes the samples of one scan into the entropy-coded segment.
pub struct ScanEncoder<'a> {
    width: usize,
    height: usize,
    state: ScanState,
    writer: BitWriter<'a>,
}

impl<'a> ScanEncoder<'a> {
    pub fn new(
        width: usize,
        height: usize,
        coding_parameters: CodingParameters,
        pc_parameters: JpeglsPcParameters,
        destination: &'a mut Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            state: ScanState::new(coding_parameters, pc_parameters),
            writer: BitWriter::new(destination),
        }
    }

    /// Encodes `source` (`height` rows of `width` samples) and returns the number of
    /// bytes appended to the destination.
    pub fn encode_scan(mut self, source: &[u16]) -> usize {
        debug_assert_eq!(source.len(), self.width * self.height);

        let mut line_buffer = LineBuffer::new(self.width);
        for (line, row) in source.chunks_exact(self.width).enumerate() {
            line_buffer.start_line();
            let (previous, current) = line_buffer.rows_mut();
            current[1..=self.width].copy_from_slice(row);
            self.encode_sample_line(previous, current);
            trace!(
                "encoded line {line}: {} bytes, run index {}",
                self.writer.bytes_written(),
                self.state.run_index()
            );
        }

        self.writer.end_scan();
        debug!(
            "encoded {}x{} scan into {} bytes",
            self.width,
            self.height,
            self.writer.bytes_written()
        );
        self.writer.bytes_written()
    }

    fn encode_sample_line(&mut self, previous: &[u16], current: &mut [u16]) {
        let width = self.width;
        let mut index = 1;
        let mut rb = previous[0] as i32;
        let mut rd = previous[1] as i32;

        while index <= width {
            let ra = current[index - 1] as i32;
            let rc = rb;
            rb = rd;
            rd = previous[index + 1] as i32;

            let qs = self.state.context_id(ra, rb, rc, rd);
            if qs != 0 {
                let predicted = compute_predicted_value(ra, rb, rc);
                let x = current[index] as i32;
                current[index] = self.encode_regular(qs, x, predicted);
                index += 1;
            } else {
                index += self.encode_run_mode(index, previous, current);
                if index <= width {
                    rb = previous[index - 1] as i32;
                    rd = previous[index] as i32;
                }
            }
        }
    }

    fn encode_regular(&mut self, qs: i32, x: i32, predicted: i32) -> u16 {
        let sign = bit_wise_sign(qs);
        let context_index = apply_sign(qs, sign) as usize;
        let limit = self.state.coding_parameters().limit;
        let qbpp = self.state.coding_parameters().quantized_bits_per_sample;

        let context = self.state.regular_mode_context(context_index);
        let k = context.compute_golomb_coding_parameter();
        let predicted_value = correct_prediction(predicted + apply_sign(context.c(), sign));
        let error_value = compute_error_value(apply_sign(x - predicted_value, sign));
        let mapped_error = map_error_value(context.get_error_correction(k) ^ error_value);
        context.update_variables_and_bias(error_value);

        encode_mapped_value(&mut self.writer, k, mapped_error, limit, qbpp);

        let reconstructed =
            compute_reconstructed_sample(predicted_value, apply_sign(error_value, sign));
        debug_assert_eq!(reconstructed as i32, x);
        reconstructed
    }

    /// Codes the run starting at `index` and, unless it reaches the end of the line,
    /// the sample that interrupts it. Returns the number of samples consumed.
    fn encode_run_mode(&mut self, index: usize, previous: &[u16], current: &mut [u16]) -> usize {
        let count_type_remain = self.width - (index - 1);
        let ra = current[index - 1];

        let mut run_length = 0;
        while run_length < count_type_remain && current[index + run_length] == ra {
            run_length += 1;
        }

        let end_of_line = run_length == count_type_remain;
        self.encode_run_pixels(run_length, end_of_line);
        if end_of_line {
            return run_length;
        }

        let position = index + run_length;
        current[position] = self.encode_run_interruption_pixel(
            current[position] as i32,
            ra as i32,
            previous[position] as i32,
        );
        self.state.decrement_run_index();
        run_length + 1
    }

    fn encode_run_pixels(&mut self, mut run_length: usize, end_of_line: bool) {
        while run_length >= self.state.run_chunk_length() {
            self.writer.write_bit(true);
            run_length -= self.state.run_chunk_length();
            self.state.increment_run_index();
        }

        if end_of_line {
            if run_length != 0 {
                self.writer.write_bit(true);
            }
        } else {
            // Leading zero, then the remainder.
            self.writer
                .write_binary_value(run_length as u32, self.state.run_order() + 1);
        }
    }

    fn encode_run_interruption_pixel(&mut self, x: i32, ra: i32, rb: i32) -> u16 {
        if ra == rb {
            let error_value = compute_error_value(x - ra);
            self.encode_run_interruption_error(1, error_value);
            compute_reconstructed_sample(ra, error_value)
        } else {
            let sign = sign(rb - ra);
            let error_value = compute_error_value((x - rb) * sign);
            self.encode_run_interruption_error(0, error_value);
            compute_reconstructed_sample(rb, error_value * sign)
        }
    }

    fn encode_run_interruption_error(&mut self, run_interruption_type: usize, error_value: i32) {
        let limit = self.state.run_interruption_limit();
        let qbpp = self.state.coding_parameters().quantized_bits_per_sample;

        let context = self.state.run_mode_context(run_interruption_type);
        let k = context.compute_golomb_coding_parameter();
        let e_mapped_error_value = context.compute_mapped_error_value(error_value, k);
        context.update_variables(error_value, e_mapped_error_value);

        encode_mapped_value(&mut self.writer, k, e_mapped_error_value, limit, qbpp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: usize, height: usize, samples: &[u16]) -> Vec<u8> {
        let mut out = Vec::new();
        let encoder = ScanEncoder::new(
            width,
            height,
            CodingParameters::lossless_16bit(),
            JpeglsPcParameters::default(),
            &mut out,
        );
        let written = encoder.encode_scan(samples);
        assert_eq!(written, out.len());
        out
    }

    #[test]
    fn zero_image_is_coded_as_runs() {
        // Both rows are single runs: 28 one bits for the first row, 2 for the second.
        let out = encode(4096, 2, &vec![0; 4096 * 2]);
        assert!(out.len() <= 4, "{} bytes", out.len());
        assert!(out.iter().all(|&b| b == 0xFF || b == 0x7F));
    }

    #[test]
    fn single_zero_sample_is_one_run_bit() {
        let out = encode(1, 1, &[0]);
        assert_eq!(out, vec![0x80]);
    }

    #[test]
    fn run_then_interruption() {
        // Context of the first sample is zero (all neighbours 0): run of length 0
        // interrupted by 5 (RItype 1).
        let out = encode(2, 1, &[5, 5]);
        assert!(!out.is_empty());
        assert_eq!(out[0] >> 7, 0, "run remainder starts with a zero bit");
    }
}
