//! JPEG-LS codestream writer.
//!
//! `JpegStreamWriter` emits the marker segments framing a single-component 16-bit
//! scan (SOI, SOF55, SOS, EOI) and hands its buffer to the scan encoder for the
//! entropy-coded data in between.

use crate::FrameInfo;
use crate::constants::{
    COMPONENT_COUNT, COMPONENT_ID, NEAR_LOSSLESS, SAMPLING_FACTORS,
    START_OF_FRAME_SEGMENT_LENGTH, START_OF_SCAN_SEGMENT_LENGTH,
};
use crate::error::JpeglsError;
use crate::jpeg_marker_code::{JPEG_MARKER_START_BYTE, JpegMarkerCode};

/// A writer for JPEG-LS codestreams backed by a growable buffer.
#[derive(Debug, Default)]
pub struct JpegStreamWriter {
    destination: Vec<u8>,
}

impl JpegStreamWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            destination: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.destination.len()
    }

    pub fn write_byte(&mut self, value: u8) {
        self.destination.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.destination.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_marker(&mut self, marker: JpegMarkerCode) {
        self.write_byte(JPEG_MARKER_START_BYTE);
        self.write_byte(marker.into());
    }

    pub fn write_start_of_image(&mut self) {
        self.write_marker(JpegMarkerCode::StartOfImage);
    }

    pub fn write_end_of_image(&mut self) {
        self.write_marker(JpegMarkerCode::EndOfImage);
    }

    /// SOF55 for one 16-bit component. Width and height must fit the 16-bit fields.
    pub fn write_start_of_frame_jpegls(
        &mut self,
        frame_info: &FrameInfo,
    ) -> Result<(), JpeglsError> {
        let width =
            u16::try_from(frame_info.width).map_err(|_| JpeglsError::InvalidArgumentWidth)?;
        let height =
            u16::try_from(frame_info.height).map_err(|_| JpeglsError::InvalidArgumentHeight)?;

        self.write_marker(JpegMarkerCode::StartOfFrameJpegls);
        self.write_u16(START_OF_FRAME_SEGMENT_LENGTH);
        self.write_byte(frame_info.bits_per_sample as u8);
        self.write_u16(height);
        self.write_u16(width);
        self.write_byte(COMPONENT_COUNT);
        self.write_byte(COMPONENT_ID);
        self.write_byte(SAMPLING_FACTORS);
        self.write_byte(0); // Tq
        Ok(())
    }

    pub fn write_start_of_scan_segment(&mut self) {
        self.write_marker(JpegMarkerCode::StartOfScan);
        self.write_u16(START_OF_SCAN_SEGMENT_LENGTH);
        self.write_byte(COMPONENT_COUNT);
        self.write_byte(COMPONENT_ID);
        self.write_byte(0); // Mapping table selector
        self.write_byte(NEAR_LOSSLESS as u8);
        self.write_byte(0); // Interleave mode: none
        self.write_byte(0); // Ah, Al point transform
    }

    /// The underlying buffer, for appending entropy-coded data.
    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.destination
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_frame_and_scan_headers() {
        let mut writer = JpegStreamWriter::default();
        writer.write_start_of_image();
        writer
            .write_start_of_frame_jpegls(&FrameInfo {
                width: 0x0102,
                height: 0x0304,
                bits_per_sample: 16,
                component_count: 1,
            })
            .unwrap();
        writer.write_start_of_scan_segment();
        writer.write_end_of_image();

        assert_eq!(
            writer.into_inner(),
            vec![
                0xFF, 0xD8, // SOI
                0xFF, 0xF7, 0x00, 0x0B, 16, 0x03, 0x04, 0x01, 0x02, 1, 1, 0x11, 0, // SOF55
                0xFF, 0xDA, 0x00, 0x08, 1, 1, 0, 0, 0, 0, // SOS
                0xFF, 0xD9, // EOI
            ]
        );
    }

    #[test]
    fn rejects_dimensions_above_16_bits() {
        let mut writer = JpegStreamWriter::default();
        let frame_info = FrameInfo {
            width: 65536,
            height: 1,
            bits_per_sample: 16,
            component_count: 1,
        };
        assert_eq!(
            writer.write_start_of_frame_jpegls(&frame_info),
            Err(JpeglsError::InvalidArgumentWidth)
        );
        assert_eq!(writer.position(), 0);
    }
}
