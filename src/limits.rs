use crate::BitmapError;
use crate::pixel::PixelLayout;

/// Caps on the pixel buffer a header is allowed to request.
///
/// Checked after the headers are read and before anything is allocated.
/// `None` means unlimited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on the unpadded pixel buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// No caps at all.
    pub const NONE: Limits = Limits {
        max_width: None,
        max_height: None,
        max_pixels: None,
        max_memory_bytes: None,
    };

    /// Only a memory cap.
    pub fn with_max_memory(bytes: u64) -> Self {
        Limits {
            max_memory_bytes: Some(bytes),
            ..Limits::NONE
        }
    }

    /// Validate the dimensions of a decode and return the pixel buffer size.
    pub(crate) fn check_buffer(
        &self,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<usize, BitmapError> {
        cap("width", u64::from(width), self.max_width)?;
        cap("height", u64::from(height), self.max_height)?;
        cap(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;

        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(layout.bytes_per_pixel()))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        cap("pixel buffer bytes", bytes as u64, self.max_memory_bytes)?;
        Ok(bytes)
    }
}

fn cap(what: &str, value: u64, max: Option<u64>) -> Result<(), BitmapError> {
    match max {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_allows_anything_that_fits() {
        assert_eq!(
            Limits::NONE.check_buffer(3, 2, PixelLayout::Bgr8).unwrap(),
            18
        );
        assert_eq!(Limits::NONE, Limits::default());
    }

    #[test]
    fn memory_cap_counts_bytes_not_pixels() {
        let limits = Limits::with_max_memory(32);
        assert_eq!(limits.check_buffer(4, 2, PixelLayout::Bgrx8).unwrap(), 32);
        let err = limits.check_buffer(3, 3, PixelLayout::Bgrx8).unwrap_err();
        assert!(err.to_string().contains("pixel buffer bytes 36 exceeds limit 32"));
    }

    #[test]
    fn pixel_cap_checked_before_size() {
        let limits = Limits {
            max_pixels: Some(10),
            ..Limits::NONE
        };
        let err = limits
            .check_buffer(u32::MAX, u32::MAX, PixelLayout::Bgrx8)
            .unwrap_err();
        assert!(matches!(err, BitmapError::LimitExceeded(_)));
    }
}
