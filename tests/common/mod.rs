//! Hand-built BMP fixtures, independent of the crate's encoder.

#![allow(dead_code)]

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Builder for a raw BMP file. Rows are given top row first, the way the
/// image is displayed, and written bottom-up with 4-byte row padding.
pub struct BmpFixture {
    pub width: i32,
    pub height: i32,
    pub bits: u16,
    /// Extra bytes between the info header and the pixel data.
    pub gap: usize,
    /// Value written into row padding bytes.
    pub pad_fill: u8,
    pub signature: [u8; 2],
    /// Pixels, top row first, `bits / 8` bytes each.
    pub rows: Vec<Vec<u8>>,
}

impl BmpFixture {
    pub fn new(bits: u16, rows: Vec<Vec<u8>>) -> Self {
        let bpp = usize::from(bits / 8);
        let width = rows.first().map_or(0, |r| r.len() / bpp) as i32;
        let height = rows.len() as i32;
        Self {
            width,
            height,
            bits,
            gap: 0,
            pad_fill: 0xCD,
            signature: *b"BM",
            rows,
        }
    }

    /// 24-bit image from a text picture: `#` white, `.` black.
    pub fn from_picture(bits: u16, picture: &[&str]) -> Self {
        let rows = picture
            .iter()
            .map(|line| {
                line.chars()
                    .flat_map(|c| {
                        let rgb = if c == '#' { WHITE } else { BLACK };
                        let mut px = rgb.to_vec();
                        if bits == 32 {
                            px.push(255);
                        }
                        px
                    })
                    .collect()
            })
            .collect();
        Self::new(bits, rows)
    }

    pub fn bytes(&self) -> Vec<u8> {
        let row_bytes = self.rows.first().map_or(0, Vec::len);
        let stride = (row_bytes + 3) & !3;
        let offset = 14 + 40 + self.gap;
        let data_size = stride * self.rows.len();

        let mut out = Vec::new();
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&((offset + data_size) as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&(offset as u32).to_le_bytes());

        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bits.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(data_size as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        out.extend(std::iter::repeat_n(0xEEu8, self.gap));
        for row in self.rows.iter().rev() {
            out.extend_from_slice(row);
            out.extend(std::iter::repeat_n(self.pad_fill, stride - row.len()));
        }
        out
    }
}
