//! JPEG-LS Implementation (ISO/IEC 14495-1 / ITU-T T.87), lossless 16-bit subset.
//!
//! The codec follows the LOCO-I pipeline of the standard:
//!
//! - causal median edge detection (MED) prediction,
//! - 365 regular contexts with adaptive bias correction,
//! - adaptive, length-limited Golomb-Rice coding of the residuals,
//! - a run mode for flat regions with two run interruption contexts.
//!
//! ## Scope
//!
//! | Feature | Supported |
//! |---------|-----------|
//! | Grayscale 16-bit, lossless | ✅ |
//! | Other bit depths | ❌ |
//! | Near-lossless (NEAR > 0) | ❌ |
//! | Multi-component / interleaved scans | ❌ |
//! | Preset parameters (LSE), SPIFF, restart markers | ❌ |
//!
//! Streams written here use the default thresholds for 16-bit samples
//! (T1 = 18, T2 = 67, T3 = 276, RESET = 64) and LIMIT = 64.
//!
//! The scan data has no checksum: a flipped bit desynchronizes the decoder and
//! yields wrong samples or an error, never a panic.

pub mod bit_reader;
pub mod bit_writer;
pub mod coding_parameters;
pub mod decoder;
pub mod encoder;
pub mod golomb;
pub mod gradient_quantizer;
pub mod prediction;
pub mod regular_mode_context;
pub mod run_mode_context;
pub mod scan_decoder;
pub mod scan_encoder;
pub mod scan_state;

pub use coding_parameters::{CodingParameters, JpeglsPcParameters};
pub use decoder::JpeglsDecoder;
pub use encoder::JpeglsEncoder;
