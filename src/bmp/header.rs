//! Fixed-layout BMP header records.
//!
//! Fields are decoded and serialized one at a time in little-endian order;
//! nothing here relies on in-memory struct layout.

/// `"BM"` read as a little-endian `u16`.
pub const BMP_SIGNATURE: u16 = 0x4D42;

/// Size of [`FileHeader`] on disk.
pub const FILE_HEADER_SIZE: u32 = 14;

/// Size of [`InfoHeader`] on disk (`BITMAPINFOHEADER`).
pub const INFO_HEADER_SIZE: u32 = 40;

/// Size of [`ColorHeader`] on disk.
pub const COLOR_HEADER_SIZE: u32 = 84;

/// `"sRGB"` color-space tag.
pub const LCS_SRGB: u32 = 0x7352_4742;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// The 14-byte record at the start of every BMP file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the pixel data.
    pub offset_data: u32,
}

impl FileHeader {
    pub(crate) fn from_bytes(b: &[u8; FILE_HEADER_SIZE as usize]) -> Self {
        Self {
            file_type: u16::from_le_bytes([b[0], b[1]]),
            file_size: u32::from_le_bytes([b[2], b[3], b[4], b[5]]),
            reserved1: u16::from_le_bytes([b[6], b[7]]),
            reserved2: u16::from_le_bytes([b[8], b[9]]),
            offset_data: u32::from_le_bytes([b[10], b[11], b[12], b[13]]),
        }
    }

    pub fn is_bmp(&self) -> bool {
        self.file_type == BMP_SIGNATURE
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.file_type.to_le_bytes());
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.offset_data.to_le_bytes());
    }
}

/// `BITMAPINFOHEADER`: the 40 bytes following the file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: i32,
    /// Positive for bottom-up rows (origin bottom-left), negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    pub(crate) fn from_bytes(b: &[u8; INFO_HEADER_SIZE as usize]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let i32_at = |i: usize| i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        Self {
            size: u32_at(0),
            width: i32_at(4),
            height: i32_at(8),
            planes: u16::from_le_bytes([b[12], b[13]]),
            bit_count: u16::from_le_bytes([b[14], b[15]]),
            compression: u32_at(16),
            size_image: u32_at(20),
            x_pixels_per_meter: i32_at(24),
            y_pixels_per_meter: i32_at(28),
            colors_used: u32_at(32),
            colors_important: u32_at(36),
        }
    }

    /// Whether rows are stored top row first.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.size_image.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}

/// Channel masks and color space, written after the info header for 32-bit
/// output. Never read from input files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorHeader {
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space_type: u32,
    pub unused: [u32; 16],
}

impl Default for ColorHeader {
    fn default() -> Self {
        Self {
            red_mask: 0x00ff_0000,
            green_mask: 0x0000_ff00,
            blue_mask: 0x0000_00ff,
            alpha_mask: 0xff00_0000,
            color_space_type: LCS_SRGB,
            unused: [0; 16],
        }
    }
}

impl ColorHeader {
    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.red_mask.to_le_bytes());
        out.extend_from_slice(&self.green_mask.to_le_bytes());
        out.extend_from_slice(&self.blue_mask.to_le_bytes());
        out.extend_from_slice(&self.alpha_mask.to_le_bytes());
        out.extend_from_slice(&self.color_space_type.to_le_bytes());
        for word in self.unused {
            out.extend_from_slice(&word.to_le_bytes());
        }
    }
}

/// Headers rewritten for the minimal layout: file header, info header and,
/// for 32-bit images only, a color header, followed directly by pixel rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanonicalHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub color: Option<ColorHeader>,
}

impl CanonicalHeaders {
    /// Recompute header sizes, pixel offset and file size.
    ///
    /// `stored_data_size` is the padded size of the pixel rows on disk.
    pub(crate) fn new(file: &FileHeader, info: &InfoHeader, stored_data_size: u32) -> Self {
        let mut file = *file;
        let mut info = *info;
        let color = if info.bit_count == 32 {
            info.size = INFO_HEADER_SIZE + COLOR_HEADER_SIZE;
            info.compression = BI_BITFIELDS;
            Some(ColorHeader::default())
        } else {
            info.size = INFO_HEADER_SIZE;
            info.compression = BI_RGB;
            None
        };
        info.size_image = stored_data_size;
        file.file_type = BMP_SIGNATURE;
        file.offset_data = FILE_HEADER_SIZE + info.size;
        file.file_size = file.offset_data.saturating_add(stored_data_size);
        Self { file, info, color }
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        self.file.write_to(out);
        self.info.write_to(out);
        if let Some(color) = &self.color {
            color.write_to(out);
        }
    }
}

/// Row stride on disk: `row_bytes` rounded up to a multiple of 4.
pub(crate) fn padded_stride(row_bytes: usize) -> Option<usize> {
    row_bytes.checked_add(3).map(|r| r & !3)
}
