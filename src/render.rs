//! Black/white pixel classification and glyph output.

use core::fmt;
use std::io::{self, Write};

use enough::Stop;

use crate::error::BitmapError;

/// The glyph pair used for pure white and pure black pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub white: char,
    pub black: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            white: '#',
            black: '.',
        }
    }
}

/// One string per image row, top row first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphGrid {
    rows: Vec<String>,
    width: usize,
}

impl GlyphGrid {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<String> {
        self.rows
    }

    /// Glyphs per row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Write every row followed by a line break.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for row in &self.rows {
            out.write_all(row.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}

impl fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Black,
    White,
}

/// Classify a 24-bit pixel byte by byte.
///
/// Every channel must be 0 or 255; the tone is taken from the first stored
/// byte (blue). On failure returns the offending byte.
fn classify_bgr(channels: &[u8]) -> Result<Tone, u8> {
    if let Some(&bad) = channels.iter().find(|&&v| v != 0 && v != 255) {
        return Err(bad);
    }
    Ok(if channels[0] == 255 {
        Tone::White
    } else {
        Tone::Black
    })
}

/// Classify the first three bytes of a 32-bit pixel as a group.
///
/// On failure returns the first byte that breaks the pattern.
fn classify_bgrx(channels: &[u8]) -> Result<Tone, u8> {
    match channels {
        [0, 0, 0, ..] => Ok(Tone::Black),
        [255, 255, 255, ..] => Ok(Tone::White),
        _ => {
            let first = channels[0];
            let culprit = channels[..3]
                .iter()
                .copied()
                .find(|&v| v != 0 && v != 255)
                .or_else(|| channels[..3].iter().copied().find(|&v| v != first))
                .unwrap_or(first);
            Err(culprit)
        }
    }
}

/// Render a bottom-up pixel buffer with the default glyphs (`#` white, `.` black).
pub fn render(
    pixels: &[u8],
    bits_per_pixel: u16,
    width: u32,
    height: u32,
) -> Result<GlyphGrid, BitmapError> {
    render_with(
        pixels,
        bits_per_pixel,
        width,
        height,
        Glyphs::default(),
        &enough::Unstoppable,
    )
}

/// Render a bottom-up pixel buffer.
///
/// 24-bit pixels are checked byte by byte: every byte must be 0 or 255 and
/// the first stored byte picks the glyph. 32-bit pixels must be pure black or
/// pure white in their first three bytes; the 4th byte is ignored. Row 0 of the result is the last
/// row stored in `pixels`.
pub fn render_with(
    pixels: &[u8],
    bits_per_pixel: u16,
    width: u32,
    height: u32,
    glyphs: Glyphs,
    stop: &dyn Stop,
) -> Result<GlyphGrid, BitmapError> {
    let (bpp, classify): (usize, fn(&[u8]) -> Result<Tone, u8>) = match bits_per_pixel {
        24 => (3, classify_bgr),
        32 => (4, classify_bgrx),
        other => return Err(BitmapError::UnsupportedDepth(other)),
    };

    let w = width as usize;
    let h = height as usize;
    let row_bytes = w
        .checked_mul(bpp)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let needed = row_bytes
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if pixels.len() < needed {
        return Err(BitmapError::BufferTooSmall {
            needed,
            actual: pixels.len(),
        });
    }

    let mut rows = Vec::with_capacity(h);
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let start = (h - 1 - y) * row_bytes;
        let stored = &pixels[start..start + row_bytes];

        let mut line = String::with_capacity(w);
        for x in 0..w {
            let px = &stored[x * bpp..(x + 1) * bpp];
            let glyph = match classify(px) {
                Ok(Tone::White) => glyphs.white,
                Ok(Tone::Black) => glyphs.black,
                Err(value) => {
                    return Err(BitmapError::InvalidColor {
                        x: x as u32,
                        y: y as u32,
                        value,
                    });
                }
            };
            line.push(glyph);
        }
        rows.push(line);
    }

    Ok(GlyphGrid { rows, width: w })
}
