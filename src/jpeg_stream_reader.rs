use log::{debug, warn};

use crate::FrameInfo;
use crate::constants::{
    BITS_PER_SAMPLE, COMPONENT_COUNT, NEAR_LOSSLESS, START_OF_FRAME_SEGMENT_LENGTH,
    START_OF_SCAN_SEGMENT_LENGTH,
};
use crate::error::JpeglsError;
use crate::jpeg_marker_code::{JPEG_MARKER_MINIMUM_CODE, JPEG_MARKER_START_BYTE, JpegMarkerCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegStreamReaderState {
    BeforeStartOfImage,
    HeaderSection,
    ScanSection,
    EndOfImage,
}

/// Parses the marker segments around a single JPEG-LS scan.
pub struct JpegStreamReader<'a> {
    source: &'a [u8],
    position: usize,
    state: JpegStreamReaderState,
    frame_info: FrameInfo,
}

impl<'a> JpegStreamReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
            state: JpegStreamReaderState::BeforeStartOfImage,
            frame_info: FrameInfo::default(),
        }
    }

    pub fn frame_info(&self) -> FrameInfo {
        self.frame_info
    }

    pub fn state(&self) -> JpegStreamReaderState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Everything after the current position; once the header is read this starts
    /// with the entropy-coded scan data.
    pub fn remaining_data(&self) -> &'a [u8] {
        &self.source[self.position..]
    }

    /// Reads SOI, SOF55 and SOS, leaving the reader at the first byte of scan data.
    pub fn read_header(&mut self) -> Result<(), JpeglsError> {
        self.read_start_of_image()?;
        self.read_start_of_frame_segment()?;
        self.read_start_of_scan_segment()?;
        debug!(
            "read header: {}x{}, {} bits, scan data at offset {}",
            self.frame_info.width,
            self.frame_info.height,
            self.frame_info.bits_per_sample,
            self.position
        );
        Ok(())
    }

    /// Skips `scan_length` bytes of scan data and checks that the next marker is EOI.
    ///
    /// Bytes between the end of the decoded bits and the marker (at most the stuffed
    /// byte after a final 0xFF) are ignored.
    pub fn read_end_of_image(&mut self, scan_length: usize) -> Result<(), JpeglsError> {
        debug_assert_eq!(self.state, JpegStreamReaderState::ScanSection);
        let scan_end = self.position + scan_length;
        let marker_position = find_marker(self.source, scan_end)
            .ok_or(JpeglsError::EndOfImageMarkerNotFound)?;
        if self.source[marker_position + 1] != u8::from(JpegMarkerCode::EndOfImage) {
            return Err(JpeglsError::EndOfImageMarkerNotFound);
        }
        if marker_position > scan_end {
            debug!("skipped {} bytes after the scan data", marker_position - scan_end);
        }

        self.position = marker_position + 2;
        self.state = JpegStreamReaderState::EndOfImage;
        if self.position < self.source.len() {
            warn!(
                "ignoring {} bytes after the end of image marker",
                self.source.len() - self.position
            );
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, JpeglsError> {
        let value = *self
            .source
            .get(self.position)
            .ok_or(JpeglsError::UnexpectedEndOfStream)?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, JpeglsError> {
        let b1 = self.read_u8()? as u16;
        let b2 = self.read_u8()? as u16;
        Ok((b1 << 8) | b2)
    }

    pub fn read_marker(&mut self) -> Result<JpegMarkerCode, JpeglsError> {
        if self.read_u8()? != JPEG_MARKER_START_BYTE {
            return Err(JpeglsError::MalformedHeader("expected a marker"));
        }
        let marker_byte = self.read_u8()?;
        JpegMarkerCode::try_from(marker_byte)
            .map_err(|_| JpeglsError::MalformedHeader("unsupported marker"))
    }

    fn expect_marker(
        &mut self,
        expected: JpegMarkerCode,
        error: &'static str,
    ) -> Result<(), JpeglsError> {
        if self.read_marker()? != expected {
            return Err(JpeglsError::MalformedHeader(error));
        }
        Ok(())
    }

    fn read_start_of_image(&mut self) -> Result<(), JpeglsError> {
        self.expect_marker(JpegMarkerCode::StartOfImage, "missing start of image marker")?;
        self.state = JpegStreamReaderState::HeaderSection;
        Ok(())
    }

    fn read_start_of_frame_segment(&mut self) -> Result<(), JpeglsError> {
        self.expect_marker(
            JpegMarkerCode::StartOfFrameJpegls,
            "missing JPEG-LS start of frame marker",
        )?;
        if self.read_u16()? != START_OF_FRAME_SEGMENT_LENGTH {
            return Err(JpeglsError::MalformedHeader("start of frame segment length"));
        }

        let bits_per_sample = self.read_u8()? as i32;
        if bits_per_sample != BITS_PER_SAMPLE {
            return Err(JpeglsError::MalformedHeader("bits per sample"));
        }
        let height = self.read_u16()? as u32;
        if height == 0 {
            return Err(JpeglsError::MalformedHeader("frame height is zero"));
        }
        let width = self.read_u16()? as u32;
        if width == 0 {
            return Err(JpeglsError::MalformedHeader("frame width is zero"));
        }
        let component_count = self.read_u8()?;
        if component_count != COMPONENT_COUNT {
            return Err(JpeglsError::MalformedHeader("component count"));
        }
        let _id = self.read_u8()?;
        let _sampling = self.read_u8()?;
        let _tq = self.read_u8()?;

        self.frame_info = FrameInfo {
            width,
            height,
            bits_per_sample,
            component_count: component_count as i32,
        };
        Ok(())
    }

    fn read_start_of_scan_segment(&mut self) -> Result<(), JpeglsError> {
        self.expect_marker(JpegMarkerCode::StartOfScan, "missing start of scan marker")?;
        if self.read_u16()? != START_OF_SCAN_SEGMENT_LENGTH {
            return Err(JpeglsError::MalformedHeader("start of scan segment length"));
        }
        if self.read_u8()? != COMPONENT_COUNT {
            return Err(JpeglsError::MalformedHeader("components in scan"));
        }
        let _id = self.read_u8()?;
        let _mapping = self.read_u8()?;
        if self.read_u8()? as i32 != NEAR_LOSSLESS {
            return Err(JpeglsError::MalformedHeader("near-lossless scans are not supported"));
        }
        let _interleave_mode = self.read_u8()?;
        let _point_transform = self.read_u8()?;

        self.state = JpegStreamReaderState::ScanSection;
        Ok(())
    }
}

/// Position of the first marker at or after `start`: a 0xFF byte followed by a byte
/// that stuffing can never produce.
fn find_marker(source: &[u8], start: usize) -> Option<usize> {
    source
        .get(start..)?
        .windows(2)
        .position(|pair| pair[0] == JPEG_MARKER_START_BYTE && pair[1] >= JPEG_MARKER_MINIMUM_CODE)
        .map(|offset| start + offset)
}
