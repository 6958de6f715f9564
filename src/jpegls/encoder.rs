use log::debug;

use crate::FrameInfo;
use crate::constants::{BITS_PER_SAMPLE, COMPONENT_COUNT, MAXIMUM_HEIGHT, MAXIMUM_WIDTH};
use crate::error::JpeglsError;
use crate::jpeg_stream_writer::JpegStreamWriter;
use crate::jpegls::scan_encoder::ScanEncoder;
use crate::jpegls::{CodingParameters, JpeglsPcParameters};

// SOI + SOF55 + SOS + EOI
const HEADER_AND_TRAILER_SIZE: usize = 2 + 13 + 10 + 2;

/// Writes a complete JPEG-LS interchange stream for one 16-bit plane.
pub struct JpeglsEncoder {
    frame_info: Option<FrameInfo>,
    coding_parameters: CodingParameters,
    pc_parameters: JpeglsPcParameters,
}

impl Default for JpeglsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JpeglsEncoder {
    pub fn new() -> Self {
        Self {
            frame_info: None,
            coding_parameters: CodingParameters::lossless_16bit(),
            pc_parameters: JpeglsPcParameters::default(),
        }
    }

    pub fn set_frame_info(&mut self, width: usize, height: usize) -> Result<(), JpeglsError> {
        if width == 0 || width > MAXIMUM_WIDTH {
            return Err(JpeglsError::InvalidArgumentWidth);
        }
        if height == 0 || height > MAXIMUM_HEIGHT {
            return Err(JpeglsError::InvalidArgumentHeight);
        }
        self.frame_info = Some(FrameInfo {
            width: width as u32,
            height: height as u32,
            bits_per_sample: BITS_PER_SAMPLE,
            component_count: COMPONENT_COUNT as i32,
        });
        Ok(())
    }

    /// Encodes `source`, row by row, into a new buffer.
    pub fn encode(&self, source: &[u16]) -> Result<Vec<u8>, JpeglsError> {
        let frame_info = self.frame_info.ok_or(JpeglsError::InvalidArgumentSize)?;
        let width = frame_info.width as usize;
        let height = frame_info.height as usize;
        if source.len() != width * height {
            return Err(JpeglsError::InvalidArgumentSize);
        }

        let mut writer = JpegStreamWriter::with_capacity(HEADER_AND_TRAILER_SIZE + source.len());
        writer.write_start_of_image();
        writer.write_start_of_frame_jpegls(&frame_info)?;
        writer.write_start_of_scan_segment();

        let scan_length = ScanEncoder::new(
            width,
            height,
            self.coding_parameters,
            self.pc_parameters,
            writer.buffer_mut(),
        )
        .encode_scan(source);

        writer.write_end_of_image();
        debug!(
            "encoded {width}x{height} image: {} bytes ({scan_length} bytes of scan data)",
            writer.position()
        );
        Ok(writer.into_inner())
    }
}
