/// Pixel memory layout of a decoded buffer.
///
/// Channels stay in the order the file stores them; nothing is swizzled.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit BGR (24-bit BMP).
    Bgr8,
    /// 4 channels, 8-bit BGRX (32-bit BMP; 4th byte is never classified).
    Bgrx8,
}

impl PixelLayout {
    /// Layout for a BMP `bits_per_pixel` field, if supported.
    pub fn from_bit_count(bits: u16) -> Option<Self> {
        match bits {
            24 => Some(Self::Bgr8),
            32 => Some(Self::Bgrx8),
            _ => None,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgrx8 => 4,
        }
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.bytes_per_pixel() as u16 * 8
    }
}
