use log::debug;

use crate::FrameInfo;
use crate::error::JpeglsError;
use crate::jpeg_stream_reader::{JpegStreamReader, JpegStreamReaderState};
use crate::jpegls::scan_decoder::ScanDecoder;
use crate::jpegls::{CodingParameters, JpeglsPcParameters};

pub struct JpeglsDecoder<'a> {
    reader: JpegStreamReader<'a>,
}

impl<'a> JpeglsDecoder<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            reader: JpegStreamReader::new(source),
        }
    }

    pub fn read_header(&mut self) -> Result<(), JpeglsError> {
        self.reader.read_header()
    }

    pub fn frame_info(&self) -> FrameInfo {
        self.reader.frame_info()
    }

    /// Decodes the scan into `destination`, which must hold exactly `width * height`
    /// samples. Reads the header first if that has not happened yet.
    ///
    /// Fails once a header read has failed or the image was already decoded. On error
    /// the content of `destination` is unspecified.
    pub fn decode(&mut self, destination: &mut [u16]) -> Result<(), JpeglsError> {
        if self.reader.state() == JpegStreamReaderState::BeforeStartOfImage {
            self.read_header()?;
        }
        if self.reader.state() != JpegStreamReaderState::ScanSection {
            return Err(JpeglsError::MalformedHeader("no complete header before the scan"));
        }
        let frame_info = self.frame_info();
        let width = frame_info.width as usize;
        let height = frame_info.height as usize;
        if destination.len() != width * height {
            return Err(JpeglsError::InvalidArgumentSize);
        }

        let scan_length = ScanDecoder::new(
            width,
            height,
            CodingParameters::lossless_16bit(),
            JpeglsPcParameters::default(),
            self.reader.remaining_data(),
        )
        .decode_scan(destination)?;

        self.reader.read_end_of_image(scan_length)?;
        debug!("decoded {width}x{height} image ({scan_length} bytes of scan data)");
        Ok(())
    }
}
