// Default RESET value as defined in ISO/IEC 14495-1, table C.2
pub const DEFAULT_RESET_THRESHOLD: i32 = 64;

/// Every sample of a scan is a full 16-bit value.
pub const BITS_PER_SAMPLE: i32 = 16;
pub const MAXIMUM_SAMPLE_VALUE: i32 = (1 << BITS_PER_SAMPLE) - 1;
pub const RANGE: i32 = MAXIMUM_SAMPLE_VALUE + 1;

/// Only lossless coding is supported; the residual mapping below is exact for NEAR = 0 only.
pub const NEAR_LOSSLESS: i32 = 0;

pub const COMPONENT_COUNT: u8 = 1;
pub const COMPONENT_ID: u8 = 1;
/// H=1, V=1
pub const SAMPLING_FACTORS: u8 = 0x11;

pub const MAXIMUM_WIDTH: usize = u16::MAX as usize;
pub const MAXIMUM_HEIGHT: usize = u16::MAX as usize;

// Segment lengths include the two length bytes themselves.
pub const START_OF_FRAME_SEGMENT_LENGTH: u16 = 2 + 9;
pub const START_OF_SCAN_SEGMENT_LENGTH: u16 = 2 + 6;

/// Number of regular mode contexts: 9 * 9 * 9 quantized gradient triples folded by sign.
pub const REGULAR_CONTEXT_COUNT: usize = 365;

pub const MAXIMUM_RUN_INDEX: usize = 31;

// Used to determine how large runs should be encoded at a time (ISO/IEC 14495-1, A.7.1.2).
pub const J: [i32; 32] = [
    0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 9, 10, 11, 12, 13,
    14, 15,
];
