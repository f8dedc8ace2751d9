use alloc::string::String;
use core::fmt;
use enough::StopReason;

/// The part of a BMP file being read when input ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    FileHeader,
    InfoHeader,
    Palette,
    PixelData,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::FileHeader => "file header",
            Section::InfoHeader => "info header",
            Section::Palette => "palette",
            Section::PixelData => "pixel data",
        })
    }
}

/// Errors from BMP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("not a BMP file: missing 'BM' signature")]
    UnrecognizedFormat,

    #[error("unsupported bit depth {0}: only 8-bit (256 color) bitmaps are supported")]
    UnsupportedBitDepth(u16),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(Section),

    #[error("could not allocate {bytes} bytes for pixel data")]
    AllocationFailed { bytes: usize },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
