use crate::bmp::{InfoHeader, pixel_data_len};
use crate::error::BitmapError;

/// Caps on the geometry a decode will accept.
///
/// Everything is unlimited by default. Height limits apply to the row
/// count, so top-down images are measured the same way as bottom-up ones.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Cap on `width × rows`.
    pub max_pixels: Option<u64>,
    /// Cap on the pixel array size, row padding included.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Validate an info header and return the pixel array size it implies.
    pub(crate) fn check(&self, header: &InfoHeader) -> Result<usize, BitmapError> {
        let width = u64::from(header.width);
        let rows = u64::from(header.abs_height());

        exceeds("width", width, self.max_width)?;
        exceeds("height", rows, self.max_height)?;
        exceeds("pixel count", width * rows, self.max_pixels)?;

        let bytes = pixel_data_len(header.width, header.height)?;
        exceeds("pixel data size", bytes as u64, self.max_memory_bytes)?;
        Ok(bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
