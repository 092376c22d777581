//! BMP encoder: uncompressed 24-bit and 32-bit BMP in the canonical layout.

use enough::Stop;

use super::header::{
    BMP_SIGNATURE, CanonicalHeaders, FileHeader, INFO_HEADER_SIZE, InfoHeader, padded_stride,
};
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// 72 DPI.
const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// Encode bottom-up, unpadded pixel rows to BMP.
pub(crate) fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    headers: Option<CanonicalHeaders>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge { width, height };
    let signed_width = i32::try_from(width).map_err(|_| too_large())?;
    let signed_height = i32::try_from(height).map_err(|_| too_large())?;

    let w = width as usize;
    let h = height as usize;
    let row_bytes = w
        .checked_mul(layout.bytes_per_pixel())
        .ok_or_else(too_large)?;
    let expected = row_bytes.checked_mul(h).ok_or_else(too_large)?;
    if pixels.len() < expected {
        return Err(BitmapError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let stride = padded_stride(row_bytes).ok_or_else(too_large)?;
    let pixel_data_size = stride.checked_mul(h).ok_or_else(too_large)?;
    let stored_size = u32::try_from(pixel_data_size).map_err(|_| too_large())?;

    let (mut file, mut info) = match headers {
        Some(CanonicalHeaders { file, info, .. }) => (file, info),
        None => fresh_headers(),
    };
    info.width = signed_width;
    info.height = signed_height;
    info.bit_count = layout.bits_per_pixel();
    file.file_type = BMP_SIGNATURE;
    let canonical = CanonicalHeaders::new(&file, &info, stored_size);

    stop.check()?;

    let mut out = Vec::with_capacity(canonical.file.file_size as usize);
    canonical.write_to(&mut out);

    if row_bytes > 0 {
        let pad_bytes = stride - row_bytes;
        for (row_idx, row) in pixels[..expected].chunks_exact(row_bytes).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            out.extend_from_slice(row);
            out.extend(core::iter::repeat_n(0u8, pad_bytes));
        }
    }

    Ok(out)
}

fn fresh_headers() -> (FileHeader, InfoHeader) {
    let file = FileHeader {
        file_type: BMP_SIGNATURE,
        file_size: 0,
        reserved1: 0,
        reserved2: 0,
        offset_data: 0,
    };
    let info = InfoHeader {
        size: INFO_HEADER_SIZE,
        width: 0,
        height: 0,
        planes: 1,
        bit_count: 0,
        compression: 0,
        size_image: 0,
        x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        colors_used: 0,
        colors_important: 0,
    };
    (file, info)
}
