//! A uniform interface over image codecs for 16-bit volumes.

use crate::error::JpeglsError;

/// Compresses and decompresses `depth` planes of `width` x `height` 16-bit samples.
pub trait Codec: Send + Sync {
    /// Human readable codec name.
    fn name(&self) -> &'static str;

    /// File name extension of compressed data, including the leading dot.
    fn extension(&self) -> &'static str;

    fn compress(
        &self,
        samples: &[u16],
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<Vec<u8>, JpeglsError>;

    /// Decodes `data` into `image`, which holds `width * height * depth` samples.
    fn decompress(
        &self,
        data: &[u8],
        image: &mut [u16],
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<(), JpeglsError>;
}

/// Lossless JPEG-LS with the default 16-bit parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JpeglsCodec;

impl Codec for JpeglsCodec {
    fn name(&self) -> &'static str {
        "JPEG-LS"
    }

    fn extension(&self) -> &'static str {
        ".2.jls"
    }

    fn compress(
        &self,
        samples: &[u16],
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<Vec<u8>, JpeglsError> {
        crate::compress(samples, width, height, depth)
    }

    fn decompress(
        &self,
        data: &[u8],
        image: &mut [u16],
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<(), JpeglsError> {
        crate::decompress_into(data, image, width, height, depth)
    }
}

/// Every codec this crate provides.
pub fn codecs() -> Vec<Box<dyn Codec>> {
    vec![Box::new(JpeglsCodec)]
}
