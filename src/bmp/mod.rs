//! BMP header records, decoder and canonical encoder.
//!
//! Use top-level [`crate::decode`], [`crate::decode_file`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;
mod header;

use std::io::{Read, Seek};

use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::BitmapError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

pub use header::{
    BMP_SIGNATURE, COLOR_HEADER_SIZE, CanonicalHeaders, ColorHeader, FILE_HEADER_SIZE,
    FileHeader, INFO_HEADER_SIZE, InfoHeader, LCS_SRGB,
};
pub(crate) use header::padded_stride;

/// Decode a bottom-up 24/32-bit BMP.
pub(crate) fn decode<R: Read + Seek>(
    source: R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    decode::decode_bmp(source, limits, stop)
}

pub(crate) fn probe<R: Read>(source: R) -> Result<ImageInfo, BitmapError> {
    decode::probe(source)
}

/// Encode bottom-up pixel rows to BMP.
///
/// `headers` carries fields to preserve from a decoded file; when `None`,
/// fresh headers are built for the canonical layout.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    headers: Option<CanonicalHeaders>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(pixels, width, height, layout, headers, stop)
}
