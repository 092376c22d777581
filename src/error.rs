use enough::StopReason;

/// Errors from BMP decoding, rendering and re-encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unrecognized file format")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    /// A pixel is neither pure black nor pure white.
    ///
    /// `x`/`y` are display coordinates (row 0 is the top of the image).
    #[error("image contains invalid colors: pixel ({x}, {y}) has channel value {value}")]
    InvalidColor { x: u32, y: u32, value: u8 },

    #[error("data transfer error: cannot render {0}-bit pixels")]
    UnsupportedDepth(u16),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl BitmapError {
    /// Whether the failure came from the underlying reader rather than the
    /// file contents (open failure, read error, truncated data).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::UnexpectedEof)
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
