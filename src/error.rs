use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpeglsError {
    /// A marker, segment length or frame field does not match the layout this
    /// codec writes.
    #[error("Malformed header: {0}")]
    MalformedHeader(&'static str),
    #[error("Unexpected end of stream")]
    UnexpectedEndOfStream,
    #[error("End of image marker not found")]
    EndOfImageMarkerNotFound,
    /// The scan decoded to something no encoder could have produced, such as
    /// a run longer than the remaining line.
    #[error("Invalid data")]
    InvalidData,

    // Logic errors
    #[error("Invalid argument width")]
    InvalidArgumentWidth,
    #[error("Invalid argument height")]
    InvalidArgumentHeight,
    #[error("Invalid argument size")]
    InvalidArgumentSize,
}
