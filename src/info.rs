use crate::bmp::{FileHeader, InfoHeader};
use crate::pixel::PixelLayout;

/// Header-level facts about a BMP file, read without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
}

impl ImageInfo {
    /// Probe a BMP header from any reader.
    pub fn from_reader<R: std::io::Read>(source: R) -> Result<Self, crate::BitmapError> {
        crate::bmp::probe(source)
    }

    /// Probe a BMP header from an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, crate::BitmapError> {
        crate::bmp::probe(data)
    }

    pub fn width(&self) -> i32 {
        self.info_header.width
    }

    /// Negative for top-down files.
    pub fn height(&self) -> i32 {
        self.info_header.height
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.info_header.bit_count
    }

    /// `None` when the bit depth cannot be decoded.
    pub fn layout(&self) -> Option<PixelLayout> {
        PixelLayout::from_bit_count(self.info_header.bit_count)
    }

    /// Whether [`crate::decode`] would accept the depth and row order.
    pub fn is_supported(&self) -> bool {
        self.layout().is_some() && self.height() >= 0 && self.width() >= 0
    }
}
