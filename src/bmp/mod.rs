//! 8-bit palettized BMP container.
//!
//! Layout handled here, all little-endian with no padding between fields:
//!
//! | section      | bytes                      |
//! |--------------|----------------------------|
//! | file header  | 14                         |
//! | info header  | 40                         |
//! | palette      | 256 × 4 (`b, g, r, 0`)     |
//! | pixel data   | `row_stride × abs(height)` |
//!
//! Pixel bytes are palette indices and are never interpreted.

mod decode;
mod encode;
mod header;

pub use header::{
    BMP_SIGNATURE, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader,
    SUPPORTED_BITS_PER_PIXEL,
};

pub(crate) use decode::decode_bmp;
pub(crate) use encode::{encode_bmp, write_bmp};

use crate::error::BitmapError;
use crate::palette::{PALETTE_BYTES, Palette};
use alloc::vec::Vec;

/// Byte offset where pixel data starts when nothing sits between the
/// palette and the pixel array.
pub const CONTIGUOUS_PIXEL_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN + PALETTE_BYTES;

/// Where the decoder looks for the pixel array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelDataLocation {
    /// Pixel data directly follows the palette (byte 1078).
    /// `pixel_data_offset` is carried through but not used to seek.
    #[default]
    Contiguous,
    /// Seek to `pixel_data_offset`. Bytes between the palette and the offset
    /// are kept in [`IndexedBitmap::gap`].
    HeaderOffset,
}

/// Bytes per pixel row for an 8-bit image, padded to a multiple of 4.
///
/// Returns `None` on overflow.
#[inline]
pub fn row_stride(width: u32) -> Option<usize> {
    (width as usize).checked_add(3).map(|w| w / 4 * 4)
}

/// Size in bytes of the pixel array for the given geometry.
///
/// `height` is the raw header field; its sign is ignored.
pub fn pixel_data_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    let rows = (height as i32).unsigned_abs();
    row_stride(width)
        .and_then(|stride| stride.checked_mul(rows as usize))
        .ok_or(BitmapError::DimensionsTooLarge {
            width,
            height: rows,
        })
}

/// A decoded 8-bit BMP: both headers, the color table and the raw pixel
/// indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedBitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub palette: Palette,
    /// Bytes between the palette and the pixel array. Always empty when
    /// decoded with [`PixelDataLocation::Contiguous`].
    pub gap: Vec<u8>,
    /// `row_stride × |height|` palette indices, rows in file order.
    pub pixels: Vec<u8>,
}

impl IndexedBitmap {
    pub fn width(&self) -> u32 {
        self.info_header.width
    }

    /// Row count, ignoring the top-down sign.
    pub fn height(&self) -> u32 {
        self.info_header.abs_height()
    }

    pub fn row_stride(&self) -> Result<usize, BitmapError> {
        row_stride(self.width()).ok_or(BitmapError::DimensionsTooLarge {
            width: self.width(),
            height: self.height(),
        })
    }

    pub fn pixel_data_len(&self) -> Result<usize, BitmapError> {
        pixel_data_len(self.info_header.width, self.info_header.height)
    }

    /// Total bytes [`crate::encode_bmp`] will produce.
    pub fn encoded_len(&self) -> Result<usize, BitmapError> {
        Ok(CONTIGUOUS_PIXEL_OFFSET + self.gap.len() + self.pixel_data_len()?)
    }

    /// One row of palette indices including its end-of-row padding.
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        let stride = self.row_stride().ok()?;
        let start = index.checked_mul(stride)?;
        self.pixels.get(start..start.checked_add(stride)?)
    }

    /// Convert the color table to grayscale. Pixel data is untouched.
    pub fn to_grayscale(&mut self) {
        self.palette.to_grayscale();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_padding_law() {
        for w in 0u32..64 {
            let stride = row_stride(w).unwrap();
            assert_eq!(stride, ((w as usize + 3) / 4) * 4);
            assert_eq!(stride % 4, 0);
            assert!(stride >= w as usize);
            assert!(stride - (w as usize) < 4);
        }
    }

    #[test]
    fn pixel_data_len_uses_absolute_height() {
        assert_eq!(pixel_data_len(5, 2).unwrap(), 16);
        assert_eq!(pixel_data_len(5, (-2i32) as u32).unwrap(), 16);
        assert_eq!(pixel_data_len(4, 0).unwrap(), 0);
    }

    #[test]
    fn contiguous_offset_is_1078() {
        assert_eq!(CONTIGUOUS_PIXEL_OFFSET, 1078);
    }
}
