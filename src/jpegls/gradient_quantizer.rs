use crate::constants::{MAXIMUM_SAMPLE_VALUE, NEAR_LOSSLESS};
use crate::jpegls::coding_parameters::JpeglsPcParameters;
use std::sync::LazyLock;

const LUT_SIZE: usize = 2 * MAXIMUM_SAMPLE_VALUE as usize + 1;

/// The table for the default 16-bit lossless thresholds, built on first use.
pub static QUANTIZATION_LUT: LazyLock<QuantizationLut> =
    LazyLock::new(|| QuantizationLut::new(&JpeglsPcParameters::default()));

/// Maps a local gradient to one of the nine regions -4..=4 (ISO/IEC 14495-1, A.3.3).
pub fn quantize_gradient(di: i32, pc: &JpeglsPcParameters) -> i32 {
    if di <= -pc.threshold3 {
        return -4;
    }
    if di <= -pc.threshold2 {
        return -3;
    }
    if di <= -pc.threshold1 {
        return -2;
    }
    if di < -NEAR_LOSSLESS {
        return -1;
    }
    if di <= NEAR_LOSSLESS {
        return 0;
    }
    if di < pc.threshold1 {
        return 1;
    }
    if di < pc.threshold2 {
        return 2;
    }
    if di < pc.threshold3 {
        return 3;
    }
    4
}

/// Precomputed [`quantize_gradient`] for every difference of two 16-bit samples.
pub struct QuantizationLut {
    table: Box<[i8]>,
}

impl QuantizationLut {
    fn new(pc: &JpeglsPcParameters) -> Self {
        let table = (-MAXIMUM_SAMPLE_VALUE..=MAXIMUM_SAMPLE_VALUE)
            .map(|di| quantize_gradient(di, pc) as i8)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        debug_assert_eq!(table.len(), LUT_SIZE);
        Self { table }
    }

    #[inline]
    pub fn quantize(&self, di: i32) -> i32 {
        self.table[(di + MAXIMUM_SAMPLE_VALUE) as usize] as i32
    }
}
