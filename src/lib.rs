//! # bmpglyph
//!
//! Decode black-and-white Windows bitmaps and render them as text glyphs.
//!
//! ## Supported Input
//!
//! - Uncompressed BMP with a 40-byte `BITMAPINFOHEADER` (or larger; extra
//!   header bytes are skipped via the stored pixel-data offset)
//! - 24-bit BGR and 32-bit BGRX/BGRA pixels
//! - Bottom-up row order only (positive height)
//! - Pixels must be pure black `(0, 0, 0)` or pure white `(255, 255, 255)`;
//!   the alpha byte of 32-bit pixels is ignored
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, JPEG, PNG) bitmaps
//! - Palette/indexed images and bit depths other than 24 and 32
//! - Top-down bitmaps
//! - Grayscale or color rendering
//!
//! ## Usage
//!
//! ```no_run
//! use bmpglyph::{Glyphs, Unstoppable};
//!
//! let decoded = bmpglyph::decode_file("glyph.bmp", Unstoppable)?;
//! let grid = decoded.render(Glyphs::default(), Unstoppable)?;
//! print!("{grid}");
//! # Ok::<(), bmpglyph::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod render;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::PixelLayout;
pub use render::{GlyphGrid, Glyphs, render, render_with};

/// Decode a BMP from any seekable reader.
pub fn decode<R: Read + Seek>(source: R, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(source).decode(stop)
}

/// Open and decode a BMP file.
///
/// The file handle is closed before this returns, on success or failure.
pub fn decode_file<P: AsRef<Path>>(path: P, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    let file = File::open(path)?;
    decode(BufReader::new(file), stop)
}

/// Read only the headers of a BMP.
pub fn probe<R: Read>(source: R) -> Result<ImageInfo, BitmapError> {
    ImageInfo::from_reader(source)
}

/// Encode bottom-up, tightly packed pixel rows as an uncompressed BMP.
///
/// 24-bit output carries a 40-byte info header; 32-bit output adds a color
/// header with standard BGRA masks.
pub fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(pixels, width, height, layout, None, &stop)
}
