use std::io::{Read, Seek};

use enough::Stop;

use crate::bmp::{CanonicalHeaders, FileHeader, InfoHeader};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::render::{GlyphGrid, Glyphs};

/// Builder for a single decode.
///
/// ```no_run
/// use bmpglyph::{DecodeRequest, Limits, Unstoppable};
///
/// let file = std::fs::File::open("glyph.bmp")?;
/// let limits = Limits { max_width: Some(4096), ..Default::default() };
/// let decoded = DecodeRequest::new(std::io::BufReader::new(file))
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", decoded.width, decoded.height);
/// # Ok::<(), bmpglyph::BitmapError>(())
/// ```
pub struct DecodeRequest<'a, R> {
    source: R,
    limits: Option<&'a Limits>,
}

impl<'a, R: Read + Seek> DecodeRequest<'a, R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read the headers and the pixel rows.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
        crate::bmp::decode(self.source, self.limits, &stop)
    }
}

/// Decoded headers plus the pixel buffer.
///
/// Pixels are tightly packed rows in file order: the first row in the buffer
/// is the bottom row of the image.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
}

impl DecodeOutput {
    pub(crate) fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        file_header: FileHeader,
        info_header: InfoHeader,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
            file_header,
            info_header,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.layout.bits_per_pixel()
    }

    /// Pixel bytes of one row, counted from the top of the image.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let row_bytes = self.width as usize * self.layout.bytes_per_pixel();
        let stored = (self.height - 1 - y) as usize;
        self.pixels.get(stored * row_bytes..(stored + 1) * row_bytes)
    }

    /// Headers as they would be written by [`crate::encode_bmp`].
    pub fn canonical_headers(&self) -> CanonicalHeaders {
        let row_bytes = self.width as usize * self.layout.bytes_per_pixel();
        let stride = crate::bmp::padded_stride(row_bytes).unwrap_or(usize::MAX);
        let stored = stride.saturating_mul(self.height as usize);
        CanonicalHeaders::new(
            &self.file_header,
            &self.info_header,
            u32::try_from(stored).unwrap_or(u32::MAX),
        )
    }

    /// Render this image with the given glyphs.
    pub fn render(&self, glyphs: Glyphs, stop: impl Stop) -> Result<GlyphGrid, BitmapError> {
        crate::render::render_with(
            &self.pixels,
            self.bits_per_pixel(),
            self.width,
            self.height,
            glyphs,
            &stop,
        )
    }

    /// Re-serialize in the canonical layout.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        crate::bmp::encode(
            &self.pixels,
            self.width,
            self.height,
            self.layout,
            Some(self.canonical_headers()),
            &stop,
        )
    }
}
