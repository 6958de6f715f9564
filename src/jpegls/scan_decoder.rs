use log::{debug, trace};

use crate::error::JpeglsError;
use crate::jpegls::bit_reader::BitReader;
use crate::jpegls::coding_parameters::{CodingParameters, JpeglsPcParameters};
use crate::jpegls::golomb::{decode_value, unmap_error_value};
use crate::jpegls::prediction::{
    apply_sign, bit_wise_sign, compute_predicted_value, compute_reconstructed_sample,
    correct_prediction, sign,
};
use crate::jpegls::scan_state::{LineBuffer, ScanState};

/// Decodes the entropy-coded segment of one scan.
///
/// Mirrors [`ScanEncoder`](super::scan_encoder::ScanEncoder) step by step; any
/// divergence between the two shows up as corrupted output, not as an error.
pub struct ScanDecoder<'a> {
    width: usize,
    height: usize,
    state: ScanState,
    reader: BitReader<'a>,
}

impl<'a> ScanDecoder<'a> {
    pub fn new(
        width: usize,
        height: usize,
        coding_parameters: CodingParameters,
        pc_parameters: JpeglsPcParameters,
        source: &'a [u8],
    ) -> Self {
        Self {
            width,
            height,
            state: ScanState::new(coding_parameters, pc_parameters),
            reader: BitReader::new(source),
        }
    }

    /// Decodes `height` rows into `destination` and returns the number of source bytes
    /// the scan occupied.
    pub fn decode_scan(mut self, destination: &mut [u16]) -> Result<usize, JpeglsError> {
        debug_assert_eq!(destination.len(), self.width * self.height);

        let mut line_buffer = LineBuffer::new(self.width);
        for (line, row) in destination.chunks_exact_mut(self.width).enumerate() {
            line_buffer.start_line();
            let (previous, current) = line_buffer.rows_mut();
            self.decode_sample_line(previous, current)?;
            row.copy_from_slice(line_buffer.current_samples());
            trace!(
                "decoded line {line}: {} bytes read, run index {}",
                self.reader.position(),
                self.state.run_index()
            );
        }

        debug!(
            "decoded {}x{} scan from {} bytes",
            self.width,
            self.height,
            self.reader.position()
        );
        Ok(self.reader.position())
    }

    fn decode_sample_line(
        &mut self,
        previous: &[u16],
        current: &mut [u16],
    ) -> Result<(), JpeglsError> {
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
                current[index] = self.decode_regular(qs, predicted)?;
                index += 1;
            } else {
                index += self.decode_run_mode(index, previous, current)?;
                if index <= width {
                    rb = previous[index - 1] as i32;
                    rd = previous[index] as i32;
                }
            }
        }
        Ok(())
    }

    fn decode_regular(&mut self, qs: i32, predicted: i32) -> Result<u16, JpeglsError> {
        let sign = bit_wise_sign(qs);
        let context_index = apply_sign(qs, sign) as usize;
        let limit = self.state.coding_parameters().limit;
        let qbpp = self.state.coding_parameters().quantized_bits_per_sample;

        let context = self.state.regular_mode_context(context_index);
        let k = context.compute_golomb_coding_parameter();
        let predicted_value = correct_prediction(predicted + apply_sign(context.c(), sign));

        let mapped_error = decode_value(&mut self.reader, k, limit, qbpp)?;

        let context = self.state.regular_mode_context(context_index);
        let error_value = unmap_error_value(mapped_error) ^ context.get_error_correction(k);
        context.update_variables_and_bias(error_value);

        Ok(compute_reconstructed_sample(
            predicted_value,
            apply_sign(error_value, sign),
        ))
    }

    /// Decodes a run starting at `index` and the sample interrupting it, if any.
    /// Returns the number of samples written.
    fn decode_run_mode(
        &mut self,
        index: usize,
        previous: &[u16],
        current: &mut [u16],
    ) -> Result<usize, JpeglsError> {
        let count_type_remain = self.width - (index - 1);
        let ra = current[index - 1];

        let run_length = self.decode_run_pixels(count_type_remain)?;
        current[index..index + run_length].fill(ra);
        if run_length == count_type_remain {
            return Ok(run_length);
        }

        let position = index + run_length;
        current[position] =
            self.decode_run_interruption_pixel(ra as i32, previous[position] as i32)?;
        self.state.decrement_run_index();
        Ok(run_length + 1)
    }

    fn decode_run_pixels(&mut self, count_type_remain: usize) -> Result<usize, JpeglsError> {
        let mut run_length = 0;
        while self.reader.read_bit()? {
            let chunk_length = self.state.run_chunk_length();
            let count = chunk_length.min(count_type_remain - run_length);
            run_length += count;

            if count == chunk_length {
                self.state.increment_run_index();
            }
            if run_length == count_type_remain {
                return Ok(run_length);
            }
        }

        run_length += self.reader.read_binary_value(self.state.run_order())? as usize;
        if run_length >= count_type_remain {
            // The remainder of a run that reaches the end of the line is never coded.
            return Err(JpeglsError::InvalidData);
        }
        Ok(run_length)
    }

    fn decode_run_interruption_pixel(&mut self, ra: i32, rb: i32) -> Result<u16, JpeglsError> {
        if ra == rb {
            let error_value = self.decode_run_interruption_error(1)?;
            Ok(compute_reconstructed_sample(ra, error_value))
        } else {
            let sign = sign(rb - ra);
            let error_value = self.decode_run_interruption_error(0)?;
            Ok(compute_reconstructed_sample(rb, error_value * sign))
        }
    }

    fn decode_run_interruption_error(
        &mut self,
        run_interruption_type: usize,
    ) -> Result<i32, JpeglsError> {
        let limit = self.state.run_interruption_limit();
        let qbpp = self.state.coding_parameters().quantized_bits_per_sample;
        let k = self
            .state
            .run_mode_context(run_interruption_type)
            .compute_golomb_coding_parameter();

        let e_mapped_error_value = decode_value(&mut self.reader, k, limit, qbpp)?;

        let context = self.state.run_mode_context(run_interruption_type);
        let error_value = context.decode_error_value(e_mapped_error_value, k);
        context.update_variables(error_value, e_mapped_error_value);
        Ok(error_value)
    }
}
