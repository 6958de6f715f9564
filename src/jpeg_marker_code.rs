use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The markers of a JPEG-LS interchange stream written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum JpegMarkerCode {
    /// SOI: Marks the start of an image.
    StartOfImage = 0xD8,

    /// EOI: Marks the end of an image.
    EndOfImage = 0xD9,

    /// SOS: Marks the start of scan.
    StartOfScan = 0xDA,

    // The following marker is defined in ISO/IEC 14495-1 | ITU T.87. (JPEG-LS standard)
    /// SOF_55: Marks the start of a JPEG-LS encoded frame.
    StartOfFrameJpegls = 0xF7,
}

pub const JPEG_MARKER_START_BYTE: u8 = 0xFF;

/// Inside entropy-coded data, a 0xFF byte followed by a byte at or above this value
/// is a marker; anything lower is a stuffed data byte.
pub const JPEG_MARKER_MINIMUM_CODE: u8 = 0x80;
