//! # jpegls16
//!
//! Lossless JPEG-LS (ISO/IEC 14495-1) compression of 16-bit single-component images
//! and volumes.
//!
//! A volume of `depth` planes of `width` x `height` samples is coded as a single
//! frame of `width` x `height * depth` samples, so both `height * depth` and `width`
//! must fit the 16-bit frame header fields.
//!
//! ```
//! let width = 16;
//! let height = 8;
//! let samples: Vec<u16> = (0..width * height).map(|i| (i * 977) as u16).collect();
//!
//! let encoded = jpegls16::compress(&samples, width, height, 1)?;
//! let decoded = jpegls16::decompress(&encoded, width, height, 1)?;
//! assert_eq!(decoded, samples);
//! # Ok::<(), jpegls16::JpeglsError>(())
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod jpeg_marker_code;
pub mod jpeg_stream_reader;
pub mod jpeg_stream_writer;
pub mod jpegls;

pub use codec::{Codec, JpeglsCodec};
pub use error::JpeglsError;
pub use jpegls::{CodingParameters, JpeglsDecoder, JpeglsEncoder, JpeglsPcParameters};

use crate::constants::{MAXIMUM_HEIGHT, MAXIMUM_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_sample: i32,
    pub component_count: i32,
}

/// Checks the caller's dimensions and returns `(width, frame height)`.
fn validate_dimensions(
    width: usize,
    height: usize,
    depth: usize,
) -> Result<(usize, usize), JpeglsError> {
    if width == 0 || width > MAXIMUM_WIDTH {
        return Err(JpeglsError::InvalidArgumentWidth);
    }
    let frame_height = height
        .checked_mul(depth)
        .filter(|&h| h != 0 && h <= MAXIMUM_HEIGHT)
        .ok_or(JpeglsError::InvalidArgumentHeight)?;
    Ok((width, frame_height))
}

/// Compresses `depth` planes of `width` x `height` samples, stored row by row and
/// plane after plane.
pub fn compress(
    samples: &[u16],
    width: usize,
    height: usize,
    depth: usize,
) -> Result<Vec<u8>, JpeglsError> {
    let (width, frame_height) = validate_dimensions(width, height, depth)?;
    if samples.len() != width * frame_height {
        return Err(JpeglsError::InvalidArgumentSize);
    }

    let mut encoder = JpeglsEncoder::new();
    encoder.set_frame_info(width, frame_height)?;
    encoder.encode(samples)
}

/// Decompresses data written by [`compress`] with the same dimensions.
pub fn decompress(
    data: &[u8],
    width: usize,
    height: usize,
    depth: usize,
) -> Result<Vec<u16>, JpeglsError> {
    let (width, frame_height) = validate_dimensions(width, height, depth)?;
    let mut image = vec![0; width * frame_height];
    decompress_into(data, &mut image, width, height, depth)?;
    Ok(image)
}

/// Like [`decompress`], but writes into `image`, which must hold exactly
/// `width * height * depth` samples. On error the content of `image` is unspecified.
pub fn decompress_into(
    data: &[u8],
    image: &mut [u16],
    width: usize,
    height: usize,
    depth: usize,
) -> Result<(), JpeglsError> {
    let (width, frame_height) = validate_dimensions(width, height, depth)?;
    if image.len() != width * frame_height {
        return Err(JpeglsError::InvalidArgumentSize);
    }

    let mut decoder = JpeglsDecoder::new(data);
    decoder.read_header()?;
    let frame_info = decoder.frame_info();
    if frame_info.width as usize != width {
        return Err(JpeglsError::MalformedHeader("frame width does not match the image"));
    }
    if frame_info.height as usize != frame_height {
        return Err(JpeglsError::MalformedHeader("frame height does not match the image"));
    }
    decoder.decode(image)
}

/// Reads the frame header of `data` without decoding the scan.
pub fn read_frame_info(data: &[u8]) -> Result<FrameInfo, JpeglsError> {
    let mut decoder = JpeglsDecoder::new(data);
    decoder.read_header()?;
    Ok(decoder.frame_info())
}
