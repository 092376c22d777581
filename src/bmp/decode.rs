//! Uncompressed 24/32-bit bottom-up BMP decoder.
//!
//! Pixel rows are kept in file order (bottom row first) with the 4-byte row
//! padding removed; channels are not swizzled.

use std::io::{self, Read, Seek, SeekFrom};

use enough::Stop;

use super::header::{FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, padded_stride};
use crate::decode::DecodeOutput;
use crate::error::BitmapError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

// ── Reader adapter ──────────────────────────────────────────────────

/// Maps short reads to [`BitmapError::UnexpectedEof`].
struct ByteReader<R> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        self.read_exact_bytes(&mut buf)?;
        Ok(buf)
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), BitmapError> {
        self.inner.read_exact(buf).map_err(eof_to_error)
    }

    /// Read and discard `n` bytes (n < 4 for row padding).
    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let mut scratch = [0u8; 4];
        let mut left = n;
        while left > 0 {
            let chunk = left.min(scratch.len());
            self.read_exact_bytes(&mut scratch[..chunk])?;
            left -= chunk;
        }
        Ok(())
    }
}

impl<R: Seek> ByteReader<R> {
    fn set_position(&mut self, pos: u64) -> Result<(), BitmapError> {
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Bytes between `pos` and the end of the stream; leaves the reader at `pos`.
    fn available_from(&mut self, pos: u64) -> Result<u64, BitmapError> {
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.set_position(pos)?;
        Ok(end.saturating_sub(pos))
    }
}

fn eof_to_error(e: io::Error) -> BitmapError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        BitmapError::UnexpectedEof
    } else {
        BitmapError::Io(e)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Read the file and info headers from the current position.
///
/// Only the signature is validated here.
fn read_headers<R: Read>(bytes: &mut ByteReader<R>) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let raw = bytes.read_fixed_bytes::<{ FILE_HEADER_SIZE as usize }>()?;
    let file = FileHeader::from_bytes(&raw);
    if !file.is_bmp() {
        return Err(BitmapError::UnrecognizedFormat);
    }

    let raw = bytes.read_fixed_bytes::<{ INFO_HEADER_SIZE as usize }>()?;
    let info = InfoHeader::from_bytes(&raw);
    Ok((file, info))
}

/// Parse headers only, without touching pixel data.
pub(crate) fn probe<R: Read>(source: R) -> Result<ImageInfo, BitmapError> {
    let mut bytes = ByteReader::new(source);
    let (file_header, info_header) = read_headers(&mut bytes)?;
    Ok(ImageInfo {
        file_header,
        info_header,
    })
}

// ── Full decode ─────────────────────────────────────────────────────

pub(crate) fn decode_bmp<R: Read + Seek>(
    source: R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    let mut bytes = ByteReader::new(source);
    let (file_header, info_header) = read_headers(&mut bytes)?;

    // The stored offset is trusted so vendor data between the headers and
    // the pixels is skipped.
    bytes.set_position(u64::from(file_header.offset_data))?;

    let layout = PixelLayout::from_bit_count(info_header.bit_count).ok_or_else(|| {
        BitmapError::UnsupportedVariant("only 24 or 32 bit images are supported".into())
    })?;

    if info_header.is_top_down() {
        return Err(BitmapError::UnsupportedVariant(
            "top-down images are not supported".into(),
        ));
    }
    if info_header.width < 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "negative image width ({})",
            info_header.width
        )));
    }

    let width = info_header.width as u32;
    let height = info_header.height as u32;
    let output_size = limits
        .unwrap_or(&Limits::NONE)
        .check_buffer(width, height, layout)?;

    let row_bytes = width as usize * layout.bytes_per_pixel();
    let stride = padded_stride(row_bytes).ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let pad = stride - row_bytes;

    // Header dimensions are untrusted: the padded rows must actually be in
    // the stream before the buffer is allocated.
    let stored_size = (stride as u64).saturating_mul(u64::from(height));
    if bytes.available_from(u64::from(file_header.offset_data))? < stored_size {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut buf = Vec::new();
    buf.try_reserve_exact(output_size).map_err(|_| {
        BitmapError::LimitExceeded(format!("cannot allocate {output_size} bytes"))
    })?;
    buf.resize(output_size, 0);

    stop.check()?;

    if pad == 0 {
        // Rows are already 4-byte aligned: one contiguous read.
        bytes.read_exact_bytes(&mut buf)?;
    } else {
        for (row_idx, row) in buf.chunks_exact_mut(row_bytes).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            bytes.read_exact_bytes(row)?;
            bytes.skip(pad)?;
        }
    }

    Ok(DecodeOutput::new(
        buf,
        width,
        height,
        layout,
        file_header,
        info_header,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;
    use std::io::Cursor;

    fn header_bytes(width: i32, height: i32, bpp: u16, offset: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bpp.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        out
    }

    #[test]
    fn skip_consumes_padding_only() {
        let mut r = ByteReader::new(Cursor::new(vec![1u8, 2, 3, 4, 5]));
        r.skip(3).unwrap();
        assert_eq!(r.read_fixed_bytes::<2>().unwrap(), [4, 5]);
        assert!(matches!(r.skip(1), Err(BitmapError::UnexpectedEof)));
    }

    #[test]
    fn truncated_info_header_is_eof() {
        let mut data = header_bytes(1, 1, 24, 54);
        data.truncate(30);
        let err = decode_bmp(Cursor::new(data), None, &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof));
        assert!(err.is_io());
    }

    #[test]
    fn padded_rows_are_stripped() {
        // 1x2, 24-bit: 3 pixel bytes + 1 padding byte per row.
        let mut data = header_bytes(1, 2, 24, 54);
        data.extend_from_slice(&[0, 0, 0, 0xAA, 255, 255, 255, 0xBB]);
        let out = decode_bmp(Cursor::new(data), None, &Unstoppable).unwrap();
        assert_eq!(out.pixels(), &[0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn claimed_size_beyond_stream_is_eof() {
        // Pixel data for 3 rows of 1 pixel needs 12 bytes; only 8 present.
        let mut data = header_bytes(1, 3, 24, 54);
        data.extend_from_slice(&[0u8; 8]);
        let err = decode_bmp(Cursor::new(data), None, &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof));
    }

    #[test]
    fn available_from_restores_position() {
        let mut r = ByteReader::new(Cursor::new(vec![1u8, 2, 3, 4, 5]));
        assert_eq!(r.available_from(2).unwrap(), 3);
        assert_eq!(r.read_fixed_bytes::<1>().unwrap(), [3]);
        assert_eq!(r.available_from(9).unwrap(), 0);
    }

    #[test]
    fn negative_width_is_rejected() {
        let data = header_bytes(-2, 2, 24, 54);
        let err = decode_bmp(Cursor::new(data), None, &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::InvalidHeader(_)));
    }

    #[test]
    fn limits_checked_before_allocation() {
        let data = header_bytes(100_000, 100_000, 32, 54);
        let limits = Limits {
            max_pixels: Some(1_000_000),
            ..Default::default()
        };
        let err = decode_bmp(Cursor::new(data), Some(&limits), &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::LimitExceeded(_)));
    }
}
